//! Plain reference-data repository.
//!
//! Projects, contractors, employees, categories, products and warehouses
//! carry no financial rules of their own beyond unique names; they exist so
//! the financial repositories have something to resolve against.

use chrono::Utc;
use mizan_core::contracts::Contractor;
use mizan_core::error::DomainError;
use mizan_core::inventory::{Product, Warehouse};
use mizan_core::ledger::Category;
use mizan_core::payroll::Employee;
use mizan_core::project::Project;
use mizan_shared::types::{ClientId, EmployeeId, ProjectId, UserId};
use rust_decimal::Decimal;

use crate::scope::Scope;
use crate::store::MemoryStore;

/// Repository for reference data.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    store: MemoryStore,
}

impl DirectoryRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Creates a project.
    pub async fn create_project(
        &self,
        name: String,
        engineer: Option<UserId>,
        client: Option<ClientId>,
    ) -> Result<Project, DomainError> {
        let mut state = self.store.write().await;
        if state
            .projects
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "project name '{}' is taken",
                name.trim()
            )));
        }
        let project = Project::new(name.trim().to_owned(), engineer, client, Utc::now());
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Fetches one project visible to the caller.
    pub async fn get_project(&self, id: ProjectId, scope: &Scope) -> Result<Project, DomainError> {
        let state = self.store.read().await;
        state
            .projects
            .get(&id)
            .filter(|project| scope.can_view_project(project))
            .cloned()
            .ok_or(DomainError::NotFound { entity: "project" })
    }

    /// Lists projects visible to the caller.
    pub async fn list_projects(&self, scope: &Scope) -> Vec<Project> {
        let state = self.store.read().await;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| scope.can_view_project(project))
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    /// Creates a contractor.
    pub async fn create_contractor(
        &self,
        name: String,
        phone: Option<String>,
        specialty: Option<String>,
    ) -> Result<Contractor, DomainError> {
        let mut state = self.store.write().await;
        if state
            .contractors
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "contractor name '{}' is taken",
                name.trim()
            )));
        }
        let contractor = Contractor::new(name.trim().to_owned(), phone, specialty, Utc::now());
        state.contractors.insert(contractor.id, contractor.clone());
        Ok(contractor)
    }

    /// Lists contractors by name.
    pub async fn list_contractors(&self) -> Vec<Contractor> {
        let state = self.store.read().await;
        let mut contractors: Vec<Contractor> = state.contractors.values().cloned().collect();
        contractors.sort_by(|a, b| a.name.cmp(&b.name));
        contractors
    }

    /// Creates an employee.
    pub async fn create_employee(
        &self,
        name: String,
        position: Option<String>,
        base_salary: Decimal,
    ) -> Result<Employee, DomainError> {
        if base_salary < Decimal::ZERO {
            return Err(DomainError::Validation(
                "base salary must not be negative".into(),
            ));
        }
        let mut state = self.store.write().await;
        let employee = Employee::new(name.trim().to_owned(), position, base_salary, Utc::now());
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Fetches one employee.
    pub async fn get_employee(&self, id: EmployeeId) -> Result<Employee, DomainError> {
        let state = self.store.read().await;
        state
            .employees
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "employee" })
    }

    /// Lists employees by name.
    pub async fn list_employees(&self) -> Vec<Employee> {
        let state = self.store.read().await;
        let mut employees: Vec<Employee> = state.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }

    /// Creates an expense category.
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Category, DomainError> {
        let mut state = self.store.write().await;
        if state
            .categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "category name '{}' is taken",
                name.trim()
            )));
        }
        let category = Category {
            id: mizan_shared::types::CategoryId::new(),
            name: name.trim().to_owned(),
            description,
            created_at: Utc::now(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Creates a product.
    pub async fn create_product(
        &self,
        name: String,
        unit: Option<String>,
    ) -> Result<Product, DomainError> {
        let mut state = self.store.write().await;
        if state
            .products
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "product name '{}' is taken",
                name.trim()
            )));
        }
        let product = Product {
            id: mizan_shared::types::ProductId::new(),
            name: name.trim().to_owned(),
            unit,
            created_at: Utc::now(),
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Creates a warehouse.
    pub async fn create_warehouse(
        &self,
        name: String,
        location: Option<String>,
    ) -> Result<Warehouse, DomainError> {
        let mut state = self.store.write().await;
        if state
            .warehouses
            .values()
            .any(|w| w.name.eq_ignore_ascii_case(name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "warehouse name '{}' is taken",
                name.trim()
            )));
        }
        let warehouse = Warehouse {
            id: mizan_shared::types::WarehouseId::new(),
            name: name.trim().to_owned(),
            location,
            created_at: Utc::now(),
        };
        state.warehouses.insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }
}
