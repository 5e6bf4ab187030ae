pub mod api;
pub mod bookmark;

/// Common pagination and sorting parameters for list commands
#[derive(Debug, Default)]
pub struct PageParams<'a> {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<&'a str>,
    pub order: Option<&'a str>,
}
