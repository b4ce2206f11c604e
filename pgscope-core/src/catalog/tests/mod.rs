mod configure_tests;
mod view_tests;

use crate::catalog::QueryOptions;
use crate::source::{STATEMENTS_SCHEMA, ServerInfo};

pub(crate) fn server(version: u32, recovery: bool, statements: bool) -> (ServerInfo, QueryOptions) {
    let mut info = ServerInfo::new(version, recovery);
    if statements {
        info = info.with_setting(STATEMENTS_SCHEMA, "public");
    }
    let options = QueryOptions::for_server(&info, 0);
    (info, options)
}
