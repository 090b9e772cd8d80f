mod config_tests;
mod parser_tests;
mod pipeline_tests;
