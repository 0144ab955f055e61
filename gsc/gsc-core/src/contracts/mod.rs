macro_rules! muse {
    ($module:ident, {$($item:ident),* $(,)?}) => {
        pub mod $module;
        pub use $module::{ $($item),* };
    };
}

muse!(gsc_credentials, {Credentials, ServiceAccountKey});
muse!(gsc_auth_context, {AuthContext});
muse!(gsc_dimension, {Dimension, SearchType});
muse!(gsc_query_request, {QueryRequest, MAX_ROW_LIMIT});
muse!(gsc_report_config, {ReportConfig, ReportSettings});
