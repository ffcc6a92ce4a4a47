//! 输入层：定位表格文件并读取教师名单

pub mod locator;
pub mod reader;

pub use locator::find_input_file;
pub use reader::{read_roster, NAME_COLUMN, PROFILE_URL_COLUMN};
