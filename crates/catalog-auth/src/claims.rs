use serde::{Deserialize, Serialize};

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Expiration, Unix seconds
    pub exp: usize,
    /// Issued-at, Unix seconds
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_shape() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "user-id-123");
        assert_eq!(value["exp"], 1234567890);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
