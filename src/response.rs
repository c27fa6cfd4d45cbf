use serde::Serialize;
use utoipa::ToSchema;

/// Pagination block attached to list responses.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Meta {
    pub current: u64,
    pub pages: u64,
    pub total: u64,
    pub limit: u64,
}

impl Meta {
    pub fn new(current: u64, limit: u64, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            current,
            pages,
            total,
            limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paged(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: Some(meta),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up() {
        assert_eq!(Meta::new(1, 10, 0).pages, 0);
        assert_eq!(Meta::new(1, 10, 10).pages, 1);
        assert_eq!(Meta::new(1, 10, 11).pages, 2);
        assert_eq!(Meta::new(3, 7, 50).pages, 8);
    }

    #[test]
    fn failure_body_omits_data_and_pagination() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("Trip not found")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "Trip not found" })
        );
    }
}
