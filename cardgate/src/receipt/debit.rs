use std::fmt;

use cardgate_proto::ErrorCode;

use super::{ApprovalInfo, GatewayReceipt, Receipt};

/// Outcome of a debit card operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebitCardReceipt {
    receipt: Receipt,
    approval_info: Option<ApprovalInfo>,
}

impl DebitCardReceipt {
    /// Authorization details; present only on approved receipts.
    #[must_use]
    pub const fn approval_info(&self) -> Option<&ApprovalInfo> {
        self.approval_info.as_ref()
    }
}

impl GatewayReceipt for DebitCardReceipt {
    fn from_failure(code: ErrorCode, message: String, debug: Option<String>) -> Self {
        Self {
            receipt: Receipt::from_failure(code, message, debug),
            approval_info: None,
        }
    }

    fn decode(text: &str) -> Self {
        let (receipt, approval_info) = Receipt::decode_with(text, |fields, approved| {
            if approved {
                ApprovalInfo::extract(fields).map(Some)
            } else {
                Ok(None)
            }
        });
        Self {
            receipt,
            approval_info: approval_info.flatten(),
        }
    }

    fn receipt(&self) -> &Receipt {
        &self.receipt
    }
}

impl fmt::Display for DebitCardReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.receipt, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_debit() {
        let receipt = DebitCardReceipt::decode(
            "APPROVED=true\nTRANSACTION_ID=8\nAUTHORIZED_AMOUNT=2500\nTRACE_NUMBER=301\n\
             REFERENCE_NUMBER=R-1",
        );
        let approval = receipt.approval_info().unwrap();
        assert_eq!(approval.authorized_amount, Some(2500));
        assert_eq!(approval.trace_number, Some(301));
        assert_eq!(approval.reference_number.as_deref(), Some("R-1"));
    }

    #[test]
    fn test_declined_debit_has_no_approval() {
        let receipt = DebitCardReceipt::decode(
            "APPROVED=false\nERROR_CODE=51\nERROR_MESSAGE=insufficient funds\nAUTHORIZED_AMOUNT=1",
        );
        assert!(receipt.approval_info().is_none());
        assert_eq!(receipt.error_message(), Some("insufficient funds"));
    }

    #[test]
    fn test_bad_trace_number_collapses() {
        let receipt = DebitCardReceipt::decode("APPROVED=true\nTRACE_NUMBER=x1");
        assert!(!receipt.is_approved());
        assert!(receipt.approval_info().is_none());
        assert_eq!(receipt.error_code(), Some("-4"));
    }
}
