use serde::Serialize;

/// Options for the transaction the router builds around a quote
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionConfig {
    /// Wrap/unwrap SOL around the swap so the native balance is used directly
    pub wrap_and_unwrap_sol: bool,
    /// Flat priority fee in lamports, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_fee_lamports: Option<u64>,
    /// Let the router simulate to size the compute unit limit
    pub dynamic_compute_unit_limit: bool,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            wrap_and_unwrap_sol: true,
            priority_fee_lamports: None,
            dynamic_compute_unit_limit: true,
        }
    }
}
