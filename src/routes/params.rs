use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::enums::TripStatus;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Returns `(page, limit, offset)` with page >= 1 and limit in 1..=100.
    pub fn normalize(&self) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1).saturating_mul(limit).min(i64::MAX as u64);
        (page, limit, offset)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TripListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TripStatus>,
    pub tourist_id: Option<Uuid>,
}

impl TripListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Trip listing already scoped to one tourist.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScopedTripQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TripStatus>,
}

impl ScopedTripQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        assert_eq!(Pagination::default().normalize(), (1, 10, 0));
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Pagination::new(0, 0).normalize(), (1, 1, 0));
        assert_eq!(Pagination::new(3, 500).normalize(), (3, 100, 200));
    }

    #[test]
    fn huge_page_saturates_the_offset() {
        let query: Pagination =
            serde_json::from_str(r#"{"page":18446744073709551615,"limit":10}"#).unwrap();
        let (page, limit, offset) = query.normalize();
        assert_eq!(page, u64::MAX);
        assert_eq!(limit, 10);
        assert_eq!(offset, i64::MAX as u64);
    }

    #[test]
    fn trip_queries_keep_their_paging() {
        let query = TripListQuery {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(query.pagination().normalize(), (2, 5, 5));

        let scoped = ScopedTripQuery {
            page: None,
            limit: Some(20),
            status: Some(TripStatus::Confirmed),
        };
        assert_eq!(scoped.pagination().normalize(), (1, 20, 0));
    }
}
