//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_PAGE_SIZE;

/// List problems query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListProblemsQuery {
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub count: Option<u32>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
}
