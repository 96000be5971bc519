/// A handler for a single OAuth2 grant type
///
/// Handling a grant is a two-phase affair. The handler first validates the
/// grant, enriching the per-request context with the principal and scope
/// that the new token will carry. Only once validation has succeeded is the
/// handler asked to issue the token from that same context.
pub trait GrantHandler {
    /// Per-request state shared between the two phases
    type Context;

    /// The result of a successful issuance
    type Response;

    /// The error produced by either phase
    type Error;

    /// The grant type identifier handled, as sent in the `grant_type`
    /// request parameter
    fn grant_type(&self) -> &str;

    /// Validates the grant and prepares the context for issuance
    ///
    /// # Errors
    ///
    /// Returns an error if the grant must be rejected. The context must be
    /// left unmodified in that case.
    fn validate_grant(&self, context: &mut Self::Context) -> Result<(), Self::Error>;

    /// Issues a token from a context that has passed validation
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be issued.
    fn issue(&self, context: &mut Self::Context) -> Result<Self::Response, Self::Error>;
}
