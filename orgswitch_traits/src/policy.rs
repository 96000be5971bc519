/// An authorization policy
///
/// A policy inspects a request and either allows it or produces a denial
/// describing why the request was refused.
pub trait Policy {
    /// The request evaluated by the policy
    type Request;

    /// The reason a request was denied
    type Denial;

    /// Evaluates the request against the policy
    ///
    /// # Errors
    ///
    /// Returns the denial if the policy does not allow the request.
    fn evaluate(&self, request: &Self::Request) -> Result<(), Self::Denial>;
}
