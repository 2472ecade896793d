//! JSON bodies shaped like real v3 API responses

use serde_json::{json, Value};

use crate::MOCK_API_URL;

/// One page of a list response.
///
/// `page` is 1-based; a `next` link is emitted while `page < total_pages`.
pub fn list_page(path: &str, resources: Vec<Value>, page: u32, total_pages: u32, total_results: u32) -> Value {
    let link = |n: u32| json!({ "href": format!("{MOCK_API_URL}{path}?page={n}&per_page=50") });
    json!({
        "pagination": {
            "total_results": total_results,
            "total_pages": total_pages,
            "first": link(1),
            "last": link(total_pages.max(1)),
            "next": if page < total_pages { link(page + 1) } else { Value::Null },
            "previous": if page > 1 { link(page - 1) } else { Value::Null },
        },
        "resources": resources,
    })
}

/// A list response holding everything on a single page
pub fn single_page(path: &str, resources: Vec<Value>) -> Value {
    let total = resources.len() as u32;
    list_page(path, resources, 1, 1, total)
}

pub fn organization(guid: &str, name: &str) -> Value {
    json!({
        "guid": guid,
        "name": name,
        "suspended": false,
        "created_at": "2024-01-10T09:00:00Z",
        "updated_at": "2024-01-10T09:00:00Z",
        "relationships": { "quota": { "data": { "guid": "quota-default" } } },
        "metadata": { "labels": {}, "annotations": {} },
        "links": { "self": { "href": format!("{MOCK_API_URL}/v3/organizations/{guid}") } },
    })
}

pub fn space(guid: &str, name: &str, org_guid: &str) -> Value {
    json!({
        "guid": guid,
        "name": name,
        "created_at": "2024-01-10T09:05:00Z",
        "relationships": {
            "organization": { "data": { "guid": org_guid } },
            "quota": { "data": null },
        },
        "metadata": { "labels": {}, "annotations": {} },
    })
}

pub fn app(guid: &str, name: &str, space_guid: &str, state: &str) -> Value {
    json!({
        "guid": guid,
        "name": name,
        "state": state,
        "created_at": "2024-01-10T09:10:00Z",
        "lifecycle": { "type": "buildpack", "data": { "buildpacks": [], "stack": "cflinuxfs4" } },
        "relationships": { "space": { "data": { "guid": space_guid } } },
        "metadata": { "labels": {}, "annotations": {} },
    })
}

pub fn package(guid: &str, app_guid: &str, state: &str) -> Value {
    json!({
        "guid": guid,
        "type": "bits",
        "state": state,
        "data": { "checksum": { "type": "sha256", "value": null }, "error": null },
        "relationships": { "app": { "data": { "guid": app_guid } } },
    })
}

pub fn build(guid: &str, package_guid: &str, state: &str, error: Option<&str>) -> Value {
    json!({
        "guid": guid,
        "state": state,
        "error": error,
        "staging_memory_in_mb": 1024,
        "staging_disk_in_mb": 1024,
        "package": { "guid": package_guid },
        "droplet": null,
        "relationships": { "app": { "data": { "guid": "app-guid" } } },
    })
}

pub fn droplet(guid: &str, app_guid: &str, state: &str) -> Value {
    json!({
        "guid": guid,
        "state": state,
        "error": null,
        "process_types": { "web": "bundle exec rackup" },
        "stack": "cflinuxfs4",
        "buildpacks": [{ "name": "ruby_buildpack", "detect_output": "ruby", "version": "1.10.0" }],
        "relationships": { "app": { "data": { "guid": app_guid } } },
    })
}

pub fn job(guid: &str, state: &str) -> Value {
    json!({
        "guid": guid,
        "operation": "app.apply_manifest",
        "state": state,
        "errors": [],
        "warnings": [],
        "links": { "self": { "href": format!("{MOCK_API_URL}/v3/jobs/{guid}") } },
    })
}

/// A `FAILED` job carrying one error per detail
pub fn failed_job(guid: &str, details: &[&str]) -> Value {
    let errors: Vec<Value> = details
        .iter()
        .map(|detail| json!({ "code": 10008, "title": "CF-UnprocessableEntity", "detail": detail }))
        .collect();
    json!({
        "guid": guid,
        "operation": "app.apply_manifest",
        "state": "FAILED",
        "errors": errors,
        "warnings": [],
    })
}

pub fn task(guid: &str, name: &str, state: &str, failure_reason: Option<&str>) -> Value {
    json!({
        "guid": guid,
        "sequence_id": 1,
        "name": name,
        "command": "rake db:migrate",
        "state": state,
        "memory_in_mb": 512,
        "disk_in_mb": 1024,
        "result": { "failure_reason": failure_reason },
        "relationships": { "app": { "data": { "guid": "app-guid" } } },
    })
}

pub fn deployment(guid: &str, value: &str, reason: &str) -> Value {
    json!({
        "guid": guid,
        "status": { "value": value, "reason": reason, "details": {} },
        "strategy": "rolling",
        "droplet": { "guid": "droplet-guid" },
        "relationships": { "app": { "data": { "guid": "app-guid" } } },
    })
}
