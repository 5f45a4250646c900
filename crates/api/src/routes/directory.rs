//! Reference data routes: projects, contractors, employees, categories,
//! products and warehouses.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_shared::types::{ClientId, EmployeeId, ProjectId, UserId};
use mizan_store::repositories::DirectoryRepository;

/// Creates the reference data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects", post(create_project))
        .route("/projects/{id}", get(get_project))
        .route("/contractors", get(list_contractors))
        .route("/contractors", post(create_contractor))
        .route("/employees", get(list_employees))
        .route("/employees", post(create_employee))
        .route("/employees/{id}", get(get_employee))
        .route("/categories", post(create_category))
        .route("/products", post(create_product))
        .route("/warehouses", post(create_warehouse))
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name (must be unique).
    pub name: String,
    /// Supervising engineer.
    pub engineer: Option<UserId>,
    /// Client the project is for.
    pub client: Option<ClientId>,
}

/// Request body for creating a contractor.
#[derive(Debug, Deserialize)]
pub struct CreateContractorRequest {
    /// Contractor name (must be unique).
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Trade or specialty.
    pub specialty: Option<String>,
}

/// Request body for creating an employee.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Employee name.
    pub name: String,
    /// Job title.
    pub position: Option<String>,
    /// Monthly base salary. Must not be negative.
    pub base_salary: Decimal,
}

/// Request body for creating an expense category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name (must be unique).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name (must be unique).
    pub name: String,
    /// Unit of measure.
    pub unit: Option<String>,
}

/// Request body for creating a warehouse.
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    /// Warehouse name (must be unique).
    pub name: String,
    /// Physical location.
    pub location: Option<String>,
}

/// GET `/projects` - List projects visible to the caller.
async fn list_projects(State(state): State<AppState>, auth: AuthUser) -> Response {
    let repo = DirectoryRepository::new(state.store.clone());
    Json(repo.list_projects(&auth.scope()).await).into_response()
}

/// POST `/projects` - Create a project.
async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo
        .create_project(payload.name, payload.engineer, payload.client)
        .await
    {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/projects/{id}` - Get one project.
async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> Response {
    let repo = DirectoryRepository::new(state.store.clone());
    match repo.get_project(id, &auth.scope()).await {
        Ok(project) => Json(project).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/contractors` - List contractors.
async fn list_contractors(State(state): State<AppState>, _auth: AuthUser) -> Response {
    let repo = DirectoryRepository::new(state.store.clone());
    Json(repo.list_contractors().await).into_response()
}

/// POST `/contractors` - Create a contractor.
async fn create_contractor(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateContractorRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo
        .create_contractor(payload.name, payload.phone, payload.specialty)
        .await
    {
        Ok(contractor) => (StatusCode::CREATED, Json(contractor)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/employees` - List employees.
async fn list_employees(State(state): State<AppState>, _auth: AuthUser) -> Response {
    let repo = DirectoryRepository::new(state.store.clone());
    Json(repo.list_employees().await).into_response()
}

/// POST `/employees` - Create an employee.
async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo
        .create_employee(payload.name, payload.position, payload.base_salary)
        .await
    {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/employees/{id}` - Get one employee.
async fn get_employee(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Response {
    let repo = DirectoryRepository::new(state.store.clone());
    match repo.get_employee(id).await {
        Ok(employee) => Json(employee).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST `/categories` - Create an expense category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo.create_category(payload.name, payload.description).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST `/products` - Create a product.
async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo.create_product(payload.name, payload.unit).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST `/warehouses` - Create a warehouse.
async fn create_warehouse(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateWarehouseRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = DirectoryRepository::new(state.store.clone());
    match repo.create_warehouse(payload.name, payload.location).await {
        Ok(warehouse) => (StatusCode::CREATED, Json(warehouse)).into_response(),
        Err(err) => domain_error_response(err),
    }
}
