mod stored_object;

pub use stored_object::StoredObject;
