use anchor_lang::error_code;

#[error_code]
pub enum ErrorCode {
    #[msg("Overflow")]
    Overflow,
    #[msg("Serialization failed")]
    SerializationFailed,
    #[msg("Invalid engine config")]
    InvalidConfig,
    #[msg("Gas supplied does not exceed the internal gas requirement")]
    InsufficientGas,
    #[msg("Out of gas")]
    OutOfGas,
    #[msg("Gas price below the reference gas price")]
    GasPriceTooLow,
    #[msg("Gas price oracle failure")]
    GasPriceOracleFailure,
    #[msg("Invalid executor")]
    InvalidExecutor,
    #[msg("Sender is not a user proxy")]
    SenderNotUserProxy,
    #[msg("Executor not minimum staked")]
    ExecutorNotMinStaked,
    #[msg("Expiry date in the past")]
    ExpiryInPast,
    #[msg("Self provider gas limit below internal gas requirement")]
    SelfProviderGasLimitTooLow,
    #[msg("Task not provided")]
    NotProvided,
    #[msg("Need at least one task")]
    NeedAtLeastOneTask,
    #[msg("Requested fewer submissions than tasks in chain")]
    InsufficientChainLength,
    #[msg("Invalid task receipt hash")]
    InvalidTaskReceiptHash,
    #[msg("Sender is neither user proxy nor provider")]
    InvalidCancelSender,
    #[msg("Provider funds underflow")]
    ProviderFundsUnderflow,
    #[msg("Gas accounting underflow")]
    GasAccountingUnderflow,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Provider module not deployed")]
    ModuleNotDeployed,
    #[msg("Provider module already provided")]
    ModuleAlreadyProvided,
    #[msg("Provider module not provided")]
    ModuleNotProvided,
    #[msg("Task spec already provided")]
    TaskSpecAlreadyProvided,
    #[msg("Task spec not provided")]
    TaskSpecNotProvided,
}
