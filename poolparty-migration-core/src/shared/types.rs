// Basic types for migration requests
pub type Address = String;
pub type ChainId = u64;
pub type Decimals = u8;
pub type TokenAmount = u128;
pub type Identifier = String;

// Result types for better error handling
pub type MigrationResult<T> = Result<T, crate::shared::error::MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_width_holds_eighteen_decimal_supplies() {
        // one billion whole tokens at 18 decimals
        let supply: TokenAmount = 1_000_000_000 * 10u128.pow(18);
        assert!(supply > u64::MAX as TokenAmount);
    }

    #[test]
    fn test_result_alias() {
        let ok: MigrationResult<ChainId> = Ok(1);
        assert_eq!(ok, Ok(1));
    }
}
