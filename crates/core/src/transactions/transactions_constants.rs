/// Transaction types
///
/// Acquisitions open a new cost lot; disposals consume lots oldest first.

/// Purchase of an asset against the quote currency. Acquisition.
pub const TRANSACTION_TYPE_BUY: &str = "BUY";

/// Sale of an asset for the quote currency. Disposal.
pub const TRANSACTION_TYPE_SELL: &str = "SELL";

/// Asset moved into the tracked account (airdrop, rebate, internal move). Acquisition.
pub const TRANSACTION_TYPE_TRANSFER_IN: &str = "TRANSFER_IN";

/// Asset moved out of the tracked account (withdrawal to an external wallet). Disposal.
pub const TRANSACTION_TYPE_TRANSFER_OUT: &str = "TRANSFER_OUT";

/// Asset deposited from outside. Acquisition.
pub const TRANSACTION_TYPE_DEPOSIT: &str = "DEPOSIT";

/// Staking payout credited in the staked asset. Acquisition.
pub const TRANSACTION_TYPE_STAKING_REWARD: &str = "STAKING_REWARD";

/// Source label for transactions mapped from Bitvavo account history
pub const TRANSACTION_SOURCE_BITVAVO: &str = "bitvavo";

/// Source label for manually entered transactions
pub const TRANSACTION_SOURCE_MANUAL: &str = "manual";

/// Prefix for ids of transactions derived from exchange history
pub const EXTERNAL_ID_PREFIX: &str = "ext:";
