//! Repository for the `employees` table.

use sqlx::PgPool;

use fieldops_core::types::DbId;

use crate::models::employee::{CreateEmployee, Employee};

/// Column list for `employees` SELECT queries.
const COLUMNS: &str = "\
    id, name, email, phone, employee_no, designation, role, circle, \
    is_active, created_at, updated_at";

/// Provides directory lookups and registration for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Register a new employee.
    ///
    /// Unique violations on email/phone/staff code bubble up as database
    /// errors; the API layer maps `uq_`-prefixed constraints to 409.
    pub async fn create(pool: &PgPool, dto: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, email, phone, employee_no, designation, role, circle) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.employee_no)
            .bind(&dto.designation)
            .bind(&dto.role)
            .bind(&dto.circle)
            .fetch_one(pool)
            .await
    }

    /// Resolve an employee by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an employee by staff code.
    pub async fn find_by_employee_no(
        pool: &PgPool,
        employee_no: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE employee_no = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(employee_no)
            .fetch_optional(pool)
            .await
    }

    /// List employees, optionally restricted to a circle and/or to active
    /// records.
    pub async fn list(
        pool: &PgPool,
        circle: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if circle.is_some() {
            conditions.push("circle = $1");
        }
        if active_only {
            conditions.push("is_active = true");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM employees {where_clause} ORDER BY name");
        let mut q = sqlx::query_as::<_, Employee>(&query);
        if let Some(circle) = circle {
            q = q.bind(circle.to_string());
        }
        q.fetch_all(pool).await
    }

    /// Fetch a batch of employees by id.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Employee>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = ANY($1)");
        sqlx::query_as::<_, Employee>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
