//! The six built-in rule modules.
//!
//! Budget, Facet and Sort read the search statistics; Order, Cart and
//! Policy read the intent context and store configuration.

pub mod budget;
pub mod cart;
pub mod facet;
pub mod order;
pub mod policy;
pub mod sort;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use budget::BudgetModule;
pub use cart::CartModule;
pub use facet::FacetModule;
pub use order::OrderModule;
pub use policy::PolicyModule;
pub use sort::SortModule;
