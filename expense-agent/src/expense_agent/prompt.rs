/// Instruction sent to the model when none is given on the command line
pub const DEFAULT_INSTRUCTION: &str = "Add an expense of Rs 5000 as shopping on 2024-01-15 with note 'New shoes', and then list all expenses between 2024-01-01 and 2024-12-31.";

pub const DEFAULT_MODEL: &str = "gpt-5";

/// Date range wide enough to cover any realistic expense history
pub const SMOKE_TEST_START_DATE: &str = "2000-01-01";
pub const SMOKE_TEST_END_DATE: &str = "2100-01-01";
