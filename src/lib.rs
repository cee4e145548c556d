pub mod photocull_core;
