use crate::ID;
use crate::Unique;

/// A poker club that hosts sessions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Club {
    #[serde(skip)]
    id: ID<Self>,
    name: String,
}

impl Club {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self { id, name }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub(crate) fn keyed(mut self, id: ID<Self>) -> Self {
        self.id = id;
        self
    }
}

impl Unique for Club {
    fn id(&self) -> ID<Self> {
        self.id.clone()
    }
}
