use crate::domain::model::RegionRecord;
use crate::domain::ports::RegionRepository;
use crate::utils::error::Result;

/// Repository over records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    regions: Vec<RegionRecord>,
}

impl InMemoryRepository {
    pub fn new(regions: Vec<RegionRecord>) -> Self {
        Self { regions }
    }
}

impl RegionRepository for InMemoryRepository {
    async fn list_regions(&self) -> Result<Vec<RegionRecord>> {
        Ok(self.regions.clone())
    }
}
