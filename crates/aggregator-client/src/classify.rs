//! Classification of transport failures into domain errors
//!
//! Each operation owns a rule table. Rules are checked in order and the first
//! one matching the failure kind wins; anything left unmatched is a
//! [`DomainError::RemoteServiceFault`].

use crate::error::{DomainError, FailureKind, RemoteFailure};
use crate::types::CustomerId;

/// Remote call being performed when the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Lookup,
    Trade,
}

/// Domain error a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    CustomerNotFound,
    InvalidTradeRequest,
    RemoteServiceFault,
}

/// One row of a classification table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: FailureKind,
    pub mapping: Mapping,
}

const fn rule(kind: FailureKind, mapping: Mapping) -> Rule {
    Rule { kind, mapping }
}

const LOOKUP_RULES: &[Rule] = &[rule(FailureKind::NotFound, Mapping::CustomerNotFound)];

const TRADE_RULES: &[Rule] = &[
    rule(FailureKind::NotFound, Mapping::CustomerNotFound),
    rule(FailureKind::BadRequest, Mapping::InvalidTradeRequest),
    rule(FailureKind::InternalServerError, Mapping::RemoteServiceFault),
];

/// Applied when no rule of the operation matches
const FALLBACK: Mapping = Mapping::RemoteServiceFault;

impl Operation {
    /// Explicitly registered rules, most specific first
    pub const fn rules(self) -> &'static [Rule] {
        match self {
            Self::Lookup => LOOKUP_RULES,
            Self::Trade => TRADE_RULES,
        }
    }

    /// Mapping chosen for a failure kind during this operation
    pub fn mapping_for(self, kind: FailureKind) -> Mapping {
        self.rules()
            .iter()
            .find(|rule| rule.kind == kind)
            .map_or(FALLBACK, |rule| rule.mapping)
    }
}

impl Mapping {
    fn into_error(self, customer_id: CustomerId, message: String) -> DomainError {
        match self {
            Self::CustomerNotFound => DomainError::CustomerNotFound(customer_id),
            Self::InvalidTradeRequest => DomainError::InvalidTradeRequest(message),
            Self::RemoteServiceFault => DomainError::RemoteServiceFault(message),
        }
    }
}

/// Convert a transport failure into exactly one domain error
///
/// `message` is the text obtained from [`crate::problem::extract`].
pub fn classify(
    operation: Operation,
    customer_id: CustomerId,
    failure: &RemoteFailure,
    message: String,
) -> DomainError {
    operation
        .mapping_for(failure.kind())
        .into_error(customer_id, message)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    const OPERATIONS: [Operation; 2] = [Operation::Lookup, Operation::Trade];

    fn failures() -> Vec<RemoteFailure> {
        let message = "status line".to_owned();
        vec![
            RemoteFailure::NotFound {
                message: message.clone(),
                body: None,
            },
            RemoteFailure::BadRequest {
                message: message.clone(),
                body: None,
            },
            RemoteFailure::InternalServerError {
                message: message.clone(),
                body: None,
            },
            RemoteFailure::Other {
                status: Some(StatusCode::SERVICE_UNAVAILABLE),
                message: message.clone(),
                body: None,
            },
            RemoteFailure::Other {
                status: None,
                message,
                body: None,
            },
        ]
    }

    #[test]
    fn every_failure_maps_to_its_table_entry() {
        use DomainError::{CustomerNotFound, InvalidTradeRequest, RemoteServiceFault};

        let id = CustomerId(1);
        let msg = || "msg".to_owned();
        let failures = failures();

        let expected = [
            (Operation::Lookup, [
                CustomerNotFound(id),
                RemoteServiceFault(msg()),
                RemoteServiceFault(msg()),
                RemoteServiceFault(msg()),
                RemoteServiceFault(msg()),
            ]),
            (Operation::Trade, [
                CustomerNotFound(id),
                InvalidTradeRequest(msg()),
                RemoteServiceFault(msg()),
                RemoteServiceFault(msg()),
                RemoteServiceFault(msg()),
            ]),
        ];

        for (operation, errors) in expected {
            for (failure, want) in failures.iter().zip(errors) {
                let error = classify(operation, id, failure, msg());
                assert_eq!(error, want, "{operation:?} {failure:?}");
            }
        }
    }

    #[test]
    fn not_found_keeps_customer_id() {
        let failures = failures();

        for operation in OPERATIONS {
            let error = classify(operation, CustomerId(42), &failures[0], "ignored".to_owned());
            assert_eq!(error, DomainError::CustomerNotFound(CustomerId(42)));
        }
    }

    #[test]
    fn bad_request_on_trade_is_invalid_request() {
        let error = classify(
            Operation::Trade,
            CustomerId(7),
            &failures()[1],
            "insufficient funds".to_owned(),
        );

        assert_eq!(error, DomainError::InvalidTradeRequest("insufficient funds".to_owned()));
    }

    #[test]
    fn server_error_on_trade_is_remote_fault() {
        let error = classify(Operation::Trade, CustomerId(7), &failures()[2], "db timeout".to_owned());

        assert_eq!(error, DomainError::RemoteServiceFault("db timeout".to_owned()));
    }

    #[test]
    fn lookup_falls_back_for_unregistered_kinds() {
        for failure in &failures()[1..] {
            let error = classify(Operation::Lookup, CustomerId(3), failure, "boom".to_owned());
            assert_eq!(error, DomainError::RemoteServiceFault("boom".to_owned()));
        }
    }

    #[test]
    fn unmapped_status_on_trade_is_remote_fault() {
        for failure in &failures()[3..] {
            let error = classify(Operation::Trade, CustomerId(3), failure, "boom".to_owned());
            assert_eq!(error, DomainError::RemoteServiceFault("boom".to_owned()));
        }
    }

    #[test]
    fn rule_tables_have_no_duplicate_kinds() {
        for operation in OPERATIONS {
            let rules = operation.rules();
            for (i, rule) in rules.iter().enumerate() {
                assert!(
                    rules[i + 1..].iter().all(|other| other.kind != rule.kind),
                    "{operation:?} registers {:?} twice",
                    rule.kind
                );
            }
        }
    }

    #[test]
    fn trade_registers_three_explicit_cases() {
        assert_eq!(
            Operation::Trade.rules().iter().map(|r| r.kind).collect::<Vec<_>>(),
            [FailureKind::NotFound, FailureKind::BadRequest, FailureKind::InternalServerError]
        );
        assert_eq!(Operation::Lookup.mapping_for(FailureKind::NotFound), Mapping::CustomerNotFound);
    }
}
