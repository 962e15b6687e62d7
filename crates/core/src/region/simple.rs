use std::sync::Arc;

use crate::scan::{ClientLease, Credentials, Result};

use super::table::Table;
use super::traits::Region;

/// Simple region, basic implementation.
///
/// Resolves table names as given, with no transformation.
#[derive(Debug, Clone)]
pub struct SimpleRegion {
    credentials: Arc<dyn Credentials>,
}

impl SimpleRegion {
    pub fn new(credentials: Arc<dyn Credentials>) -> Self {
        Self { credentials }
    }
}

impl Region for SimpleRegion {
    fn aws(&self) -> Result<ClientLease> {
        ClientLease::acquire(self.credentials.as_ref())
    }

    fn table(&self, name: &str) -> Table {
        Table::new(Arc::clone(&self.credentials), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{item, MockCredentials};
    use crate::scan::{Conditions, ScanValve};

    #[test]
    fn test_table_keeps_name() {
        let region = SimpleRegion::new(Arc::new(MockCredentials::default()));
        assert_eq!(region.table("users").name(), "users");
    }

    #[test]
    fn test_aws_leases_from_credentials() {
        let credentials = MockCredentials::default();
        let region = SimpleRegion::new(Arc::new(credentials.clone()));

        drop(region.aws().unwrap());

        assert_eq!(credentials.acquired(), 1);
        assert_eq!(credentials.released(), 1);
    }

    #[tokio::test]
    async fn test_same_name_yields_equivalent_tables() {
        let credentials = MockCredentials::with_items(vec![vec![item(&[("id", "1")])]]);
        let region = SimpleRegion::new(Arc::new(credentials.clone()));
        let valve = ScanValve::new();

        let first = region
            .table("users")
            .scan(&valve, &Conditions::new(), &[])
            .await
            .unwrap();
        let second = region
            .table("users")
            .scan(&valve, &Conditions::new(), &[])
            .await
            .unwrap();

        assert_eq!(first.items(), second.items());
        let requests = credentials.requests();
        assert_eq!(requests[0], requests[1]);
    }
}
