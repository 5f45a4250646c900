//! Repositories: load snapshots, plan with the core, commit atomically.
//!
//! Every financial mutation takes the store's write guard once, resolves
//! the aggregates it touches, hands snapshots to the core planning
//! functions, and commits the returned plan before releasing the guard.

pub mod contracts;
pub mod directory;
pub mod inventory;
pub mod payroll;
pub mod sales;
pub mod transactions;
pub mod treasuries;

pub use contracts::ContractRepository;
pub use directory::DirectoryRepository;
pub use inventory::{StockLevel, StockRepository, UpdateStockOperationInput};
pub use payroll::PayrollRepository;
pub use sales::SaleRepository;
pub use transactions::TransactionRepository;
pub use treasuries::{TreasuryDetails, TreasuryRepository, UpdateTreasuryInput};
