mod request_tests;
mod utils;
