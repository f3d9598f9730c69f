mod impact_config;

pub use impact_config::{read_config_file, ImpactConfiguration};
