pub mod config_ops;
pub mod predict_ops;
pub mod repl_ops;
pub mod url_ops;
