use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use potrack_core::{DomainError, PoId};

/// Purchase order status lifecycle.
///
/// A PO becomes `Completed` when its remaining balance reaches zero; nothing
/// in this crate ever transitions it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Billing mode of a purchase order (the `type` field on the wire).
///
/// Under time-and-spend billing, the milestone percentage is derived from the
/// spend ratio. Fixed-price POs track milestones by other means, so the
/// reconciliation derivation leaves theirs untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingMode {
    #[serde(rename = "T&S")]
    TimeAndSpend,
    #[serde(rename = "Fixed")]
    FixedPrice,
}

impl BillingMode {
    pub fn is_time_and_spend(self) -> bool {
        matches!(self, BillingMode::TimeAndSpend)
    }
}

/// Purchase order read model, as served by the backend.
///
/// Invariants maintained by the backend (and preserved by every patch this
/// crate derives): `0 <= bal_value <= total_value`, `milestone` in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: PoId,
    pub po_number: String,
    pub client_name: String,
    #[serde(rename = "type")]
    pub billing: BillingMode,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Percentage of PO value billed to date.
    pub milestone: Decimal,
    pub total_value: Decimal,
    pub bal_value: Decimal,
    pub status: PoStatus,
}

/// Partial update of a purchase order's financial state.
///
/// "No change" is an explicit `None` rather than an absent field in some
/// ad-hoc map; `None` fields are omitted from the PATCH body so the backend
/// leaves them alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoPatch {
    pub bal_value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PoStatus>,
}

impl PoPatch {
    /// Whether applying this patch completes the purchase order.
    pub fn completes_po(&self) -> bool {
        self.status == Some(PoStatus::Completed)
    }
}

impl PurchaseOrder {
    /// Remaining balance available for invoicing.
    pub fn remaining_balance(&self) -> Decimal {
        self.bal_value
    }

    /// Derive the patch for a paid amount against this purchase order.
    ///
    /// - `bal_value` decreases by `amount` and never goes negative.
    /// - `milestone` is recomputed from the spend ratio only under
    ///   time-and-spend billing; otherwise it is left unchanged (`None`).
    /// - `status` becomes `Completed` exactly when the new balance is zero.
    ///
    /// Errors when `amount` is negative or exceeds the remaining balance.
    pub fn apply_payment(&self, amount: Decimal) -> Result<PoPatch, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation("payment amount must not be negative"));
        }
        if amount > self.bal_value {
            return Err(DomainError::invariant(
                "payment amount exceeds the remaining balance of the purchase order",
            ));
        }

        let bal_value = self.bal_value - amount;

        // Milestone is a spend ratio; undefined for a zero-value PO.
        let milestone = if self.billing.is_time_and_spend() && !self.total_value.is_zero() {
            Some((self.total_value - bal_value) / self.total_value * Decimal::from(100))
        } else {
            None
        };

        let status = if bal_value.is_zero() {
            Some(PoStatus::Completed)
        } else {
            None
        };

        Ok(PoPatch {
            bal_value,
            milestone,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_po(total: Decimal, bal: Decimal, billing: BillingMode) -> PurchaseOrder {
        PurchaseOrder {
            id: PoId::new("po-1"),
            po_number: "PO-2024-001".to_string(),
            client_name: "Acme Ltd".to_string(),
            billing,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            milestone: (total - bal) / total.max(Decimal::ONE) * dec!(100),
            total_value: total,
            bal_value: bal,
            status: PoStatus::Open,
        }
    }

    #[test]
    fn partial_payment_reduces_balance_and_derives_milestone() {
        let po = test_po(dec!(1000), dec!(1000), BillingMode::TimeAndSpend);

        let patch = po.apply_payment(dec!(400)).unwrap();
        assert_eq!(patch.bal_value, dec!(600));
        assert_eq!(patch.milestone, Some(dec!(40)));
        assert_eq!(patch.status, None);
        assert!(!patch.completes_po());
    }

    #[test]
    fn final_payment_completes_the_purchase_order() {
        let po = test_po(dec!(1000), dec!(400), BillingMode::TimeAndSpend);

        let patch = po.apply_payment(dec!(400)).unwrap();
        assert_eq!(patch.bal_value, Decimal::ZERO);
        assert_eq!(patch.milestone, Some(dec!(100)));
        assert_eq!(patch.status, Some(PoStatus::Completed));
        assert!(patch.completes_po());
    }

    #[test]
    fn fixed_price_po_keeps_its_milestone_untouched() {
        let po = test_po(dec!(1000), dec!(1000), BillingMode::FixedPrice);

        let patch = po.apply_payment(dec!(250)).unwrap();
        assert_eq!(patch.bal_value, dec!(750));
        assert_eq!(patch.milestone, None);
    }

    #[test]
    fn payment_exceeding_balance_is_rejected() {
        let po = test_po(dec!(1000), dec!(300), BillingMode::TimeAndSpend);

        let err = po.apply_payment(dec!(500)).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("exceeds the remaining balance") => {}
            _ => panic!("Expected InvariantViolation for overdrawn payment"),
        }
    }

    #[test]
    fn negative_payment_is_rejected() {
        let po = test_po(dec!(1000), dec!(1000), BillingMode::TimeAndSpend);

        let err = po.apply_payment(dec!(-1)).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("negative") => {}
            _ => panic!("Expected Validation error for negative payment"),
        }
    }

    #[test]
    fn patch_serialization_omits_unchanged_fields() {
        let patch = PoPatch {
            bal_value: dec!(600),
            milestone: Some(dec!(40)),
            status: None,
        };

        let json = serde_json::to_value(&patch).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("balValue"));
        assert!(obj.contains_key("milestone"));
        assert!(!obj.contains_key("status"));
    }

    #[test]
    fn completing_patch_serializes_status() {
        let patch = PoPatch {
            bal_value: Decimal::ZERO,
            milestone: Some(dec!(100)),
            status: Some(PoStatus::Completed),
        };

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["balValue"], 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any 0 <= amount <= bal <= total, the derived patch keeps
        /// the balance within [0, total] and the milestone within [0, 100].
        #[test]
        fn derived_patch_preserves_po_invariants(
            (total, bal, amount) in (1i64..10_000_000i64).prop_flat_map(|total| {
                (Just(total), 0i64..=total).prop_flat_map(|(total, bal)| {
                    (Just(total), Just(bal), 0i64..=bal)
                })
            })
        ) {
            let total = Decimal::from(total);
            let bal = Decimal::from(bal);
            let amount = Decimal::from(amount);
            let po = test_po(total, bal, BillingMode::TimeAndSpend);

            let patch = po.apply_payment(amount).unwrap();

            prop_assert_eq!(patch.bal_value, bal - amount);
            prop_assert!(patch.bal_value >= Decimal::ZERO);
            prop_assert!(patch.bal_value <= total);

            let milestone = patch.milestone.unwrap();
            prop_assert!(milestone >= Decimal::ZERO);
            prop_assert!(milestone <= Decimal::from(100));

            prop_assert_eq!(patch.status == Some(PoStatus::Completed), patch.bal_value.is_zero());
        }
    }
}
