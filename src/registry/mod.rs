mod customer_registry;

pub use customer_registry::CustomerRegistry;
