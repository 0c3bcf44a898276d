//! Shared builders for repository integration tests.

use sqlx::PgPool;

use fieldops_core::types::DbId;
use fieldops_db::models::employee::{CreateEmployee, Employee};
use fieldops_db::models::event::{CreateEvent, Event};
use fieldops_db::repositories::{EmployeeRepo, EventRepo};

/// Insert an employee with unique contact fields derived from `tag`.
pub async fn seed_employee(pool: &PgPool, tag: &str) -> Employee {
    // Cheap stable hash so distinct tags get distinct phone numbers.
    let tag_hash: u64 = tag
        .bytes()
        .enumerate()
        .map(|(i, b)| (i as u64 + 1) * u64::from(b))
        .sum();
    let dto = CreateEmployee {
        name: format!("Employee {tag}"),
        email: format!("{tag}@fieldops.test"),
        phone: format!("98{:08}", tag_hash % 100_000_000),
        employee_no: format!("EMP-{tag}"),
        designation: "Field Executive".to_string(),
        role: "SALES_STAFF".to_string(),
        circle: "MAHARASHTRA".to_string(),
    };
    EmployeeRepo::create(pool, &dto)
        .await
        .expect("employee insert should succeed")
}

/// Insert an event created by `created_by`, with no manager and an empty
/// team.
pub async fn seed_event(pool: &PgPool, name: &str, created_by: DbId) -> Event {
    let now = chrono::Utc::now();
    let dto = CreateEvent {
        name: name.to_string(),
        location: "Pune".to_string(),
        circle: "MAHARASHTRA".to_string(),
        zone: "West".to_string(),
        category: "Fair".to_string(),
        start_date: now - chrono::Duration::days(1),
        end_date: now + chrono::Duration::days(3),
        target_sim: 100,
        target_ftth: 50,
        allocated_sim: 120,
        allocated_ftth: 60,
        key_insight: None,
        assigned_team: None,
        assigned_to: None,
        assigned_to_staff_code: None,
        created_by,
    };
    EventRepo::create(pool, &dto, None)
        .await
        .expect("event insert should succeed")
}
