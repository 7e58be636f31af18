/// Identifier of the single goal of an initial proof state.
pub const MAIN_GOAL_NAME: &str = "main";

/// Environment variable overriding the path of the tactic options file.
pub const ENV_TACTIC_CONFIG_PATH: &str = "HYTACTIC_CONFIG_PATH";

/// Prefix of the names given to fresh metavariables.
pub const METAVAR_PREFIX: &str = "m";
