//! 从 Scholar 主页链接中提取用户标识

use crate::models::UserId;
use reqwest::Url;

/// 查询参数名
const USER_PARAM: &str = "user";

/// 提取 `user` 参数
///
/// 先按 URL 解析查询串；解析失败（例如缺少协议头）或没有该参数时，
/// 退回到在原始字符串中查找 `user=` 并截取到下一个 `&`。
/// 任何情况下都不会报错，找不到就返回 None。
pub fn extract_user_id(profile_url: &str) -> Option<UserId> {
    let profile_url = profile_url.trim();
    if profile_url.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(profile_url) {
        let from_query = url
            .query_pairs()
            .filter(|(key, _)| key == USER_PARAM)
            .find_map(|(_, value)| UserId::new(value.into_owned()));
        if from_query.is_some() {
            return from_query;
        }
    }

    scan_raw(profile_url)
}

/// 在原始字符串中手动截取 `user=` 的值
fn scan_raw(profile_url: &str) -> Option<UserId> {
    let needle = format!("{}=", USER_PARAM);

    profile_url
        .split('?')
        .find_map(|part| part.find(&needle).map(|idx| &part[idx + needle.len()..]))
        .and_then(|rest| rest.split(['&', '#']).next())
        .and_then(UserId::new)
}
