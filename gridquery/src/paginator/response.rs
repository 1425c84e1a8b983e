use serde::Serialize;

use super::footer::Footer;

/// One page of mapped rows plus totals and footer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsePayload<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub page_size: i64,
    pub footer: Footer,
}
