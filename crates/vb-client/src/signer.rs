//! Transaction-id signing seam.
//!
//! Some endpoints require a signed `x-client-transaction-id` header derived
//! from the request method and path. The signing algorithm lives outside
//! this workspace; the client only needs a seam to ask for a header value
//! once per call that wants one.

/// Produces the signed transaction header value for a method + path pair.
///
/// Returning `None` means signing is unavailable and the header is omitted
/// from the request.
pub trait TransactionSigner: Send + Sync {
    fn sign(&self, method: &str, path: &str) -> Option<String>;
}

/// The shipped default: no signing, header omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSigner;

impl TransactionSigner for DisabledSigner {
    fn sign(&self, _method: &str, _path: &str) -> Option<String> {
        None
    }
}

/// Closures work as signers, which keeps tests and embedders simple.
impl<F> TransactionSigner for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn sign(&self, method: &str, path: &str) -> Option<String> {
        self(method, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_signer_omits_the_header() {
        assert_eq!(DisabledSigner.sign("GET", "/i/api/graphql/x/UserTweets"), None);
    }

    #[test]
    fn closures_are_signers() {
        let signer = |method: &str, path: &str| Some(format!("{method}:{path}"));
        assert_eq!(
            signer.sign("GET", "/x").as_deref(),
            Some("GET:/x")
        );
    }
}
