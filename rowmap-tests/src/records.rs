use rowmap::Record;

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Address {
    #[tag(db = "street")]
    pub street: String,
    #[tag(db = "city")]
    pub city: String,
}

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct Customer {
    #[tag(db = "id", json = "customerId")]
    pub id: i64,
    #[tag(db = "name", json = "name")]
    pub name: String,
    #[tag(db = "score")]
    pub score: f64,
    #[tag(db = "active")]
    pub active: bool,
    #[tag(db = "visits")]
    pub visits: i32,
    #[tag(db = "nickname")]
    pub nickname: Option<String>,
    #[tag(db = "address")]
    pub address: Address,
    /// Not mapped, the mapper never reads nor writes it.
    pub scratch: Vec<u8>,
}

/// Record with a field the mapper must not write.
#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct AuditEntry {
    #[tag(db = "id")]
    pub id: i64,
    #[tag(db = "message")]
    pub message: String,
    #[tag(db = "created_by")]
    #[rowmap(readonly)]
    pub created_by: String,
}
