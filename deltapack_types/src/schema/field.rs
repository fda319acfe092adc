use crate::schema::TypeRef;

/// Static metadata about one field of a record type.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FieldDescriptor {
    name: String,
    declared_type: TypeRef,
    participates: bool,
    use_delta: bool,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        declared_type: TypeRef,
        participates: bool,
        use_delta: bool,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type,
            participates,
            use_delta,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    /// Whether the field travels through the codec at all.
    pub fn participates(&self) -> bool {
        self.participates
    }

    /// Whether the field is stored by delta across the elements of an array.
    pub fn use_delta(&self) -> bool {
        self.use_delta
    }
}
