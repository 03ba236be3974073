//! Steeple church administration backend - integration test support.
//!
//! Re-exports the workspace crates so integration tests reach everything
//! through `steeple_test::` paths.

pub mod component {
    pub use steeple_core::{collection, constants, util};

    pub mod config {
        pub use steeple_app::config::ConfigHandler;
        pub use steeple_core::config::*;
    }

    pub mod model {
        pub use steeple_db::model::*;
    }

    pub mod store {
        pub use steeple_db::storage::*;
        pub use steeple_db::store::*;
    }

    pub mod service {
        pub use steeple_service::*;
    }
}

pub mod app {
    pub use steeple_app::*;

    pub mod api {
        pub use steeple_app::app::api::*;
    }
}
