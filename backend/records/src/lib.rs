//! # Records
//!
//! Flat JSON persistence for the three entities: users, products and sales.
//!
//! Every list lives in its own file inside one data directory. Reads treat a
//! missing file as an empty list, writes go through a temp file and a rename
//! so a reader never sees half a file.
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

pub mod cart;
pub mod error;
pub mod journal;
pub mod products;
pub mod receipt;
pub mod sales;
pub mod users;

pub use cart::{Cart, CartLine, CartUpdate};
pub use error::{CartError, RecordsError, SaleError};
pub use journal::SaleJournal;
pub use products::{MAX_PRICE, Product};
pub use receipt::render_receipt;
pub use sales::{Sale, SaleItem, SaleLine, TAX_RATE, checkout, sort_newest_first};
pub use users::{DEFAULT_ADMIN_ID, PublicUser, Role, User};

const USERS_FILE: &str = "users.json";
const PRODUCTS_FILE: &str = "products.json";
const SALES_FILE: &str = "sales.json";
const JOURNAL_FILE: &str = "sale.journal";

#[derive(Clone, Debug)]
pub struct DataFiles {
    dir: PathBuf,
}

impl DataFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn users(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    pub fn products(&self) -> PathBuf {
        self.dir.join(PRODUCTS_FILE)
    }

    pub fn sales(&self) -> PathBuf {
        self.dir.join(SALES_FILE)
    }

    pub fn journal(&self) -> PathBuf {
        self.dir.join(JOURNAL_FILE)
    }

    pub fn ensure_dir(&self) -> Result<(), RecordsError> {
        fs::create_dir_all(&self.dir).map_err(|source| RecordsError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    pub fn read_users(&self) -> Result<Vec<User>, RecordsError> {
        read_list(&self.users())
    }

    pub fn write_users(&self, users: &[User]) -> Result<(), RecordsError> {
        write_list(&self.users(), users)
    }

    pub fn read_products(&self) -> Result<Vec<Product>, RecordsError> {
        read_list(&self.products())
    }

    pub fn write_products(&self, products: &[Product]) -> Result<(), RecordsError> {
        write_list(&self.products(), products)
    }

    pub fn read_sales(&self) -> Result<Vec<Sale>, RecordsError> {
        read_list(&self.sales())
    }

    pub fn write_sales(&self, sales: &[Sale]) -> Result<(), RecordsError> {
        write_list(&self.sales(), sales)
    }

    /// Seeds the built-in admin account. Returns `true` when the users file
    /// had to be written.
    pub fn ensure_default_admin(&self, password: &str) -> Result<bool, RecordsError> {
        let mut users = self.read_users()?;

        if users.iter().any(|user| user.id == DEFAULT_ADMIN_ID) {
            return Ok(false);
        }

        users.push(User::default_admin(password));
        self.write_users(&users)?;

        Ok(true)
    }
}

pub fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RecordsError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(RecordsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&data).map_err(|source| RecordsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), RecordsError> {
    write_json(path, &items)
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RecordsError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| RecordsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    write_atomic(path, &bytes).map_err(|source| RecordsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    fs::create_dir_all(parent)?;

    let tmp = parent.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("records")
    ));

    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_files_read_as_empty() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());

        assert!(files.read_users().unwrap().is_empty());
        assert!(files.read_products().unwrap().is_empty());
        assert!(files.read_sales().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());
        fs::write(files.products(), "{not json").unwrap();

        assert!(matches!(
            files.read_products(),
            Err(RecordsError::Json { .. })
        ));
    }

    #[test]
    fn writes_pretty_json_without_leftover_temp_file() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path().join("nested"));
        let products = vec![Product::new("Green Tea", "TEA-001", 2.5, 10, None)];

        files.write_products(&products).unwrap();

        let text = fs::read_to_string(files.products()).unwrap();
        assert!(text.contains("\n  {"));
        assert_eq!(files.read_products().unwrap(), products);

        let leftovers: Vec<_> = fs::read_dir(files.dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn default_admin_seeded_once() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());

        assert!(files.ensure_default_admin("password").unwrap());
        assert!(!files.ensure_default_admin("password").unwrap());

        let users = files.read_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, DEFAULT_ADMIN_ID);
        assert_eq!(users[0].role, Role::Admin);
    }

    #[test]
    fn default_admin_appended_next_to_existing_users() {
        let dir = tempdir().unwrap();
        let files = DataFiles::new(dir.path());
        let cashier = User::new("Casey", "casey", "secret1", Role::Cashier);
        files.write_users(&[cashier.clone()]).unwrap();

        assert!(files.ensure_default_admin("password").unwrap());

        let users = files.read_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], cashier);
        assert_eq!(users[1].username, "admin");
    }
}
