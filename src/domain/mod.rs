// Domain layer: catalog, ledger and ports. No HTTP or CLI concerns here.

pub mod catalog;
pub mod ledger;
pub mod model;
pub mod ports;
