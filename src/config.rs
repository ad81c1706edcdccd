use crate::model::{InterfaceDefinition, ReservedExports};

/// User id placed in projected payloads when the caller does not supply one.
pub const DEFAULT_USER_ID: &str = "test";

/// Number of undo steps an editing session keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Whether a table block without fields may be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyTablePolicy {
    /// Save it; the block is shown as incomplete.
    #[default]
    Allow,
    /// Refuse to save with [`crate::error::ValidationError::EmptyTableBlock`].
    Reject,
}

/// Settings shared by the editor, the projector and the save path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub default_user_id: String,
    pub reserved: ReservedExports,
    pub empty_table_policy: EmptyTablePolicy,
    /// Oldest undo steps are dropped beyond this depth.
    pub history_limit: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            default_user_id: DEFAULT_USER_ID.to_string(),
            reserved: ReservedExports::default(),
            empty_table_policy: EmptyTablePolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MapperConfig {
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::new()
    }

    /// A new definition for `id`, seeded with this configuration's reserved export rows.
    pub fn new_definition(&self, id: impl Into<String>) -> InterfaceDefinition {
        InterfaceDefinition::seeded(id, &self.reserved)
    }
}

pub struct MapperConfigBuilder {
    config: MapperConfig,
}

impl MapperConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MapperConfig::default(),
        }
    }

    pub fn with_default_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.config.default_user_id = user_id.into();
        self
    }

    /// Overrides the remote names of the seeded status and message export rows.
    pub fn with_reserved_exports(
        mut self,
        status_param: impl Into<String>,
        message_param: impl Into<String>,
    ) -> Self {
        self.config.reserved = ReservedExports {
            status_param: status_param.into(),
            message_param: message_param.into(),
        };
        self
    }

    pub fn with_empty_table_policy(mut self, policy: EmptyTablePolicy) -> Self {
        self.config.empty_table_policy = policy;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn build(self) -> MapperConfig {
        self.config
    }
}

impl Default for MapperConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
