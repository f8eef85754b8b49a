//! Defaults shared by the config and the submit form

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "rendersub.toml";

/// Submit defaults
pub mod submit {
    pub const NUM_INSTANCES: u32 = 1;
    pub const CHUNK_SIZE: u32 = 10;
    pub const SPOOL_DIR: &str = ".rendersub/spool";
}

/// Built-in instance types as (name, service label, description)
pub const INSTANCE_TYPES: [(&str, &str, &str); 3] = [
    ("standard", "zync_standard", "8 core, 30GB RAM"),
    ("highmem", "zync_highmem", "8 core, 52GB RAM"),
    ("highcpu", "zync_highcpu", "16 core, 14GB RAM"),
];
