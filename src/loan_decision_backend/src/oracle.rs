use candid::Principal;

use crate::error::{LoanError, Result};
use crate::types::{ClassifyRequest, ClassifyResponse, FeatureColumn, Verdict};

/// Anything that can turn a feature row into an approval verdict.
#[allow(async_fn_in_trait)]
pub trait ModelOracle {
    async fn classify(&self, columns: Vec<FeatureColumn>) -> Result<Verdict>;
}

/// Convert the oracle's wire response, rejecting labels and probabilities
/// outside their domain.
pub fn verdict_from_response(resp: &ClassifyResponse) -> Result<Verdict> {
    let approved = match resp.label {
        0 => false,
        1 => true,
        other => {
            return Err(LoanError::OracleUnavailable(format!(
                "oracle returned unknown label {}",
                other
            )))
        }
    };
    if !(0.0..=1.0).contains(&resp.probability) {
        return Err(LoanError::OracleUnavailable(format!(
            "oracle returned probability {} outside [0, 1]",
            resp.probability
        )));
    }
    Ok(Verdict {
        approved,
        probability: resp.probability,
    })
}

/// Model oracle reached through an inter-canister call
pub struct CanisterOracle {
    principal: Option<Principal>,
}

impl CanisterOracle {
    pub fn new(principal: Option<Principal>) -> Self {
        Self { principal }
    }
}

impl ModelOracle for CanisterOracle {
    #[allow(deprecated)]
    async fn classify(&self, columns: Vec<FeatureColumn>) -> Result<Verdict> {
        let principal = self.principal.ok_or_else(|| {
            LoanError::OracleUnavailable("model oracle principal is not configured".to_string())
        })?;

        let request = ClassifyRequest { columns };
        let result: std::result::Result<(ClassifyResponse,), _> =
            ic_cdk::call(principal, "classify", (request,)).await;

        match result {
            Ok((resp,)) => verdict_from_response(&resp),
            Err(err) => Err(LoanError::OracleUnavailable(format!(
                "call to {} failed: {:?}",
                principal, err
            ))),
        }
    }
}
