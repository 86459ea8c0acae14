//! End-to-end scenarios over the in-memory store: build a company and its
//! reporting tree through the services, then query compensation.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use paygraph::store::{MemoryCompanyStore, MemoryStaffStore};
use paygraph::{
    CompanyService, CreateCompany, CreateStaff, HierarchyError, Role, StaffService,
};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap()
}

struct World {
    staff: StaffService,
    companies: CompanyService,
}

fn world() -> World {
    let staff_store = Arc::new(MemoryStaffStore::new());
    let company_store = Arc::new(MemoryCompanyStore::new());
    World {
        staff: StaffService::new(staff_store, company_store.clone()),
        companies: CompanyService::new(company_store),
    }
}

async fn hire(
    world: &World,
    name: &str,
    role: Role,
    joined: (i32, u32, u32),
    company_id: Uuid,
    supervisor_id: Option<Uuid>,
) -> Uuid {
    world
        .staff
        .create(CreateStaff {
            name: name.to_string(),
            role,
            joined_at: Utc.with_ymd_and_hms(joined.0, joined.1, joined.2, 0, 0, 0).unwrap(),
            base_salary: 500,
            company_id,
            supervisor_id,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_full_hierarchy_compensation_flow() {
    let world = world();
    let company = world
        .companies
        .create(CreateCompany {
            name: "acme".to_string(),
        })
        .await
        .unwrap();

    // Rainmaker over two team leads, each with two individual contributors.
    let rainmaker = hire(&world, "rainmaker", Role::Rainmaker, (2005, 6, 14), company.id, None).await;
    let lead_a = hire(&world, "lead-a", Role::TeamLead, (2015, 6, 14), company.id, Some(rainmaker)).await;
    let lead_b = hire(&world, "lead-b", Role::TeamLead, (2015, 6, 14), company.id, Some(rainmaker)).await;
    for (n, lead) in [(0, lead_a), (1, lead_b), (2, lead_a), (3, lead_b)] {
        hire(
            &world,
            &format!("ic-{n}"),
            Role::IndividualContributor,
            (2020, 6, 14),
            company.id,
            Some(lead),
        )
        .await;
    }

    let ic_pay = world
        .staff
        .get_compensation(
            world.staff.subordinates(lead_a).await.unwrap()[0].id,
            at(),
        )
        .await
        .unwrap();
    assert_eq!(ic_pay.amount, 575);

    assert_eq!(world.staff.get_compensation(lead_a, at()).await.unwrap().amount, 706);
    assert_eq!(world.staff.get_compensation(lead_b, at()).await.unwrap().amount, 706);
    assert_eq!(world.staff.get_compensation(rainmaker, at()).await.unwrap().amount, 611);

    let total = world
        .staff
        .get_total_compensation_for_company(company.id, at())
        .await
        .unwrap();
    assert_eq!(total.company_id, company.id);
    assert_eq!(total.total, 611 + 2 * 706 + 4 * 575);
}

#[tokio::test]
async fn test_company_total_is_shape_independent() {
    // Same seven members, flat under a single lead instead of nested: the
    // company total is the sum of per-member results either way.
    let world = world();
    let company = world
        .companies
        .create(CreateCompany {
            name: "flatco".to_string(),
        })
        .await
        .unwrap();

    let lead = hire(&world, "lead", Role::TeamLead, (2015, 6, 14), company.id, None).await;
    for n in 0..3 {
        hire(
            &world,
            &format!("ic-{n}"),
            Role::IndividualContributor,
            (2020, 6, 14),
            company.id,
            Some(lead),
        )
        .await;
    }

    let mut per_member = 0i64;
    for member in world.staff.find_by_company(company.id).await.unwrap() {
        per_member += world.staff.get_compensation(member.id, at()).await.unwrap().amount;
    }
    let total = world
        .staff
        .get_total_compensation_for_company(company.id, at())
        .await
        .unwrap();
    assert_eq!(total.total, per_member);
}

#[tokio::test]
async fn test_reassignment_moves_the_bonus() {
    let world = world();
    let company = world
        .companies
        .create(CreateCompany {
            name: "moveco".to_string(),
        })
        .await
        .unwrap();

    let lead_a = hire(&world, "lead-a", Role::TeamLead, (2015, 6, 14), company.id, None).await;
    let lead_b = hire(&world, "lead-b", Role::TeamLead, (2015, 6, 14), company.id, None).await;
    let ic = hire(&world, "ic", Role::IndividualContributor, (2020, 6, 14), company.id, Some(lead_a)).await;

    assert_eq!(world.staff.get_compensation(lead_a, at()).await.unwrap().amount, 703);
    assert_eq!(world.staff.get_compensation(lead_b, at()).await.unwrap().amount, 700);

    world.staff.assign_supervisor(ic, Some(lead_b)).await.unwrap();

    assert_eq!(world.staff.get_compensation(lead_a, at()).await.unwrap().amount, 700);
    assert_eq!(world.staff.get_compensation(lead_b, at()).await.unwrap().amount, 703);
}

#[tokio::test]
async fn test_guard_failures_surface_unmodified() {
    let world = world();
    let company = world
        .companies
        .create(CreateCompany {
            name: "guardco".to_string(),
        })
        .await
        .unwrap();

    let ic = hire(&world, "ic", Role::IndividualContributor, (2020, 6, 14), company.id, None).await;
    let other = hire(&world, "other", Role::IndividualContributor, (2020, 6, 14), company.id, None).await;

    let err = world.staff.assign_supervisor(ic, Some(ic)).await.unwrap_err();
    assert!(matches!(err, HierarchyError::SelfSupervision));

    let err = world.staff.assign_supervisor(other, Some(ic)).await.unwrap_err();
    assert!(matches!(err, HierarchyError::InvalidSupervisorRole(_)));

    // Detaching never fails.
    let detached = world.staff.assign_supervisor(ic, None).await.unwrap();
    assert!(detached.supervisor_id.is_none());
}

#[tokio::test]
async fn test_missing_staff_is_an_error_not_zero() {
    let world = world();
    let err = world
        .staff
        .get_compensation(Uuid::new_v4(), at())
        .await
        .unwrap_err();
    assert!(matches!(err, HierarchyError::NotFound(_)));
}
