use crate::naming::identifiers::{
  clean_vendor_prefix, ensure_identifier, strip_http_verb_prefix, to_snake_case, to_type_name,
};

#[test]
fn test_strip_http_verb_prefix() {
  struct Case {
    name: &'static str,
    method: Option<&'static str>,
    expected: &'static str,
  }

  let cases = [
    Case {
      name: "postStartXqlQuery",
      method: Some("post"),
      expected: "StartXqlQuery",
    },
    Case {
      name: "getIncidents",
      method: Some("get"),
      expected: "Incidents",
    },
    Case {
      name: "getItems",
      method: Some("GET"),
      expected: "Items",
    },
    Case {
      name: "get_items",
      method: Some("get"),
      expected: "_items",
    },
    Case {
      name: "delete-widget",
      method: Some("delete"),
      expected: "-widget",
    },
    Case {
      name: "getter",
      method: Some("get"),
      expected: "getter",
    },
    Case {
      name: "getAutomationScripts",
      method: Some("post"),
      expected: "getAutomationScripts",
    },
    Case {
      name: "get",
      method: Some("get"),
      expected: "get",
    },
    Case {
      name: "postStartXqlQuery",
      method: None,
      expected: "postStartXqlQuery",
    },
    Case {
      name: "postStartXqlQuery",
      method: Some(""),
      expected: "postStartXqlQuery",
    },
  ];

  for case in cases {
    assert_eq!(
      strip_http_verb_prefix(case.name, case.method),
      case.expected,
      "name={}, method={:?}",
      case.name,
      case.method
    );
  }
}

#[test]
fn test_strip_http_verb_prefix_multibyte_name() {
  assert_eq!(strip_http_verb_prefix("gé", Some("get")), "gé");
  assert_eq!(strip_http_verb_prefix("pütItem", Some("put")), "pütItem");
}

#[test]
fn test_clean_vendor_prefix() {
  assert_eq!(clean_vendor_prefix("public_api-v1-alerts-get_alerts"), "alerts-get_alerts-v1");
  assert_eq!(
    clean_vendor_prefix("-public_api-v2-alerts-get_alerts_multi_events"),
    "alerts-get_alerts_multi_events-v2"
  );
  assert_eq!(clean_vendor_prefix("public_api-alerts-get_alerts"), "alerts-get_alerts");
  assert_eq!(clean_vendor_prefix("startXqlQuery"), "startXqlQuery");
  assert_eq!(clean_vendor_prefix("alerts-get_alerts-v1"), "alerts-get_alerts-v1");
  assert_eq!(clean_vendor_prefix("_items"), "items");
}

#[test]
fn test_clean_vendor_prefix_is_idempotent() {
  for name in [
    "public_api-v1-alerts-get_alerts",
    "-public_api-v2-alerts-get_alerts_multi_events",
    "getIncidents",
  ] {
    let once = clean_vendor_prefix(name);
    assert_eq!(clean_vendor_prefix(&once), once, "name={name}");
  }
}

#[test]
fn test_to_snake_case() {
  struct Case {
    name: &'static str,
    method: Option<&'static str>,
    expected: &'static str,
  }

  let cases = [
    Case {
      name: "postStartXqlQuery",
      method: Some("post"),
      expected: "start_xql_query",
    },
    Case {
      name: "getIncidentID",
      method: Some("post"),
      expected: "get_incident_id",
    },
    Case {
      name: "get_items",
      method: Some("get"),
      expected: "items",
    },
    Case {
      name: "public_api-v1-alerts-get_alerts",
      method: Some("post"),
      expected: "alerts_get_alerts_v1",
    },
    Case {
      name: "HTTPServer",
      method: None,
      expected: "http_server",
    },
    Case {
      name: "updateData",
      method: None,
      expected: "update_data",
    },
    Case {
      name: "List<Item>Names",
      method: None,
      expected: "list_item_names",
    },
    Case {
      name: "incident_id",
      method: None,
      expected: "incident_id",
    },
    Case {
      name: "x.y",
      method: None,
      expected: "xy",
    },
  ];

  for case in cases {
    assert_eq!(
      to_snake_case(case.name, case.method),
      case.expected,
      "name={}, method={:?}",
      case.name,
      case.method
    );
  }
}

#[test]
fn test_to_snake_case_keeps_verb_without_method() {
  assert_eq!(to_snake_case("getWidget", None), "get_widget");
  assert_eq!(to_snake_case("postGetWidget", None), "post_get_widget");
}

#[test]
fn test_ensure_identifier() {
  assert_eq!(ensure_identifier("status"), "status");
  assert_eq!(ensure_identifier("2fa"), "_2fa");
  assert_eq!(ensure_identifier(""), "unnamed");
}

#[test]
fn test_to_type_name() {
  assert_eq!(to_type_name("xsiam_update_incident"), "XsiamUpdateIncident");
  assert_eq!(to_type_name("_2fa_verify"), "T2faVerify");
  assert_eq!(to_type_name(""), "Unnamed");
}
