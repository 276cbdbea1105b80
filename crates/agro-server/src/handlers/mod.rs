//! HTTP handlers

pub mod barter;
pub mod dao;
pub mod health;
pub mod liquidity;
pub mod marketplace;
pub mod microjobs;
pub mod users;

pub use health::health;

use agro_core::Id;

/// An empty query value means "no filter"
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A `userId` filter. Empty, non-numeric and non-positive values mean
/// "no filter".
pub(crate) fn user_filter(raw: Option<String>) -> Option<Id> {
    non_empty(raw)
        .and_then(|v| v.trim().parse::<Id>().ok())
        .filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_filter() {
        assert_eq!(user_filter(Some("7".into())), Some(7));
        assert_eq!(user_filter(Some(" 7 ".into())), Some(7));
        assert_eq!(user_filter(Some(String::new())), None);
        assert_eq!(user_filter(Some("abc".into())), None);
        assert_eq!(user_filter(Some("0".into())), None);
        assert_eq!(user_filter(None), None);
    }
}
