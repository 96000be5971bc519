use aliri_braid::braid;
use std::fmt;

macro_rules! limited_reveal {
    ($ty:ty: $hidden:literal, $default:literal) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    f.write_str("\"")?;
                    limited_reveal(&self.0, &mut *f, $default)?;
                    f.write_str("\"")
                } else {
                    f.write_str(concat!("***", $hidden, "***"))
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    limited_reveal(&self.0, &mut *f, usize::MAX)
                } else {
                    f.write_str(concat!("***", $hidden, "***"))
                }
            }
        }
    };
}

fn limited_reveal(unprotected: &str, f: &mut fmt::Formatter, default_len: usize) -> fmt::Result {
    let max_len = f.width().unwrap_or(default_len);
    if max_len <= 1 {
        f.write_str("…")
    } else if max_len > unprotected.len() {
        f.write_str(unprotected)
    } else {
        match unprotected.char_indices().nth(max_len - 2) {
            Some((idx, c)) if idx + c.len_utf8() < unprotected.len() => {
                f.write_str(&unprotected[0..idx + c.len_utf8()])?;
                f.write_str("…")
            }
            _ => f.write_str(unprotected),
        }
    }
}

/// An organization identifier
#[braid(serde, ref_doc = "A borrowed reference to an [`OrganizationId`]")]
pub struct OrganizationId;

/// A tenant domain, the namespace in which a token was originally issued
#[braid(serde, ref_doc = "A borrowed reference to a [`TenantDomain`]")]
pub struct TenantDomain;

/// An OAuth2 grant type identifier, such as `organization_switch`
#[braid(serde)]
pub struct GrantType;

/// An OAuth2 client identifier
#[braid(serde)]
pub struct ClientId;

/// The identifier of a bearer token presented for exchange
#[braid(serde, debug = "owned", display = "owned")]
pub struct TokenIdentifier;

limited_reveal!(TokenIdentifierRef: "TOKEN", 8);

/// The value of a token binding, such as a device or session cookie hash
#[braid(serde, debug = "owned", display = "owned")]
pub struct TokenBindingValue;

limited_reveal!(TokenBindingValueRef: "BINDING VALUE", 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_identifier_is_redacted_by_default() {
        let token = TokenIdentifier::from_static("0a1b2c3d-4e5f-6789");
        assert_eq!(format!("{}", token), "***TOKEN***");
        assert_eq!(format!("{:?}", token), "***TOKEN***");
    }

    #[test]
    fn token_identifier_reveals_prefix_with_alternate_debug() {
        let token = TokenIdentifier::from_static("0a1b2c3d-4e5f-6789");
        assert_eq!(format!("{:#?}", token), "\"0a1b2c3…\"");
    }

    #[test]
    fn token_identifier_reveals_all_with_alternate_display() {
        let token = TokenIdentifier::from_static("0a1b2c3d");
        assert_eq!(format!("{:#}", token), "0a1b2c3d");
    }

    #[test]
    fn binding_value_honors_requested_width() {
        let value = TokenBindingValue::from_static("cookie-hash-value");
        assert_eq!(format!("{:#3}", value), "co…");
    }
}
