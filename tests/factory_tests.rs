//! End-to-end factory tests against a mock HTTP server.
//!
//! These verify the URL shapes each operation produces, the status-folding
//! contracts (422 vs other failures, `exists` swallowing everything), auth
//! header presentation, and response-driven resource population.

use std::sync::Arc;

use active_resource::{
    Field, Resource, ResourceConnection, ResourceError, ResourceFactory, ResourceFormat,
};
use serde::{Deserialize, Serialize};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Person {
    id: Option<i64>,
    name: Option<String>,
    birthdate: Option<chrono::NaiveDate>,
}

impl Resource for Person {
    const TYPE_NAME: &'static str = "Person";
    const FIELDS: &'static [Field] = &[
        Field::new("id"),
        Field::new("name"),
        Field::new("birthdate"),
    ];

    fn id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

fn person_xml(id: i64, name: &str) -> String {
    format!(
        "<person><id type=\"integer\">{id}</id><name>{name}</name></person>"
    )
}

async fn xml_factory(server: &MockServer) -> ResourceFactory<Person> {
    let site = Url::parse(&server.uri()).unwrap();
    let connection = Arc::new(ResourceConnection::new(site).unwrap());
    ResourceFactory::new(connection, ResourceFormat::Xml)
}

#[tokio::test]
async fn find_issues_get_to_the_member_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/5.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(person_xml(5, "Ace"), "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let person = factory.find("5").await.unwrap();
    assert_eq!(person.id, Some(5));
    assert_eq!(person.name.as_deref(), Some("Ace"));
}

#[tokio::test]
async fn find_maps_404_to_resource_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/99.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    assert!(matches!(
        factory.find("99").await,
        Err(ResourceError::ResourceNotFound)
    ));
}

#[tokio::test]
async fn exists_folds_failures_into_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/5.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(person_xml(5, "Ace"), "application/xml"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/people/500.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    assert!(factory.exists("5").await);
    // 404 (unmatched request) and 500 both fold to false
    assert!(!factory.exists("99").await);
    assert!(!factory.exists("500").await);
}

#[tokio::test]
async fn find_all_decodes_the_collection_in_order() {
    let server = MockServer::start().await;
    let body = format!(
        "<people type=\"array\">{}{}</people>",
        person_xml(2, "Bo"),
        person_xml(1, "Ace")
    );
    Mock::given(method("GET"))
        .and(path("/people.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let people = factory.find_all().await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].id, Some(2));
    assert_eq!(people[1].name.as_deref(), Some("Ace"));
}

#[tokio::test]
async fn find_all_of_an_empty_collection_returns_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<people type=\"array\"/>", "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let people = factory.find_all().await.unwrap();
    assert!(people.is_empty());
}

#[tokio::test]
async fn find_all_from_reaches_custom_endpoints() {
    let server = MockServer::start().await;
    let body = format!("<people type=\"array\">{}</people>", person_xml(7, "Gee"));
    Mock::given(method("GET"))
        .and(path("/people/geeks.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let geeks = factory.find_all_from("geeks").await.unwrap();
    assert_eq!(geeks.len(), 1);
    assert_eq!(geeks[0].id, Some(7));
}

#[tokio::test]
async fn find_all_with_appends_query_parameters() {
    let server = MockServer::start().await;
    let body = format!("<people type=\"array\">{}</people>", person_xml(3, "Mgr"));
    Mock::given(method("GET"))
        .and(path("/people.xml"))
        .and(query_param("position", "manager"))
        .and(query_param("salary", "60000"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let managers = factory
        .find_all_with(vec![("position", "manager"), ("salary", "60000")])
        .await
        .unwrap();
    assert_eq!(managers.len(), 1);
}

#[tokio::test]
async fn create_populates_the_server_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people.xml"))
        .and(header("content-type", "application/xml"))
        .respond_with(
            ResponseTemplate::new(201).set_body_raw(person_xml(42, "Newborn"), "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let mut person = Person {
        id: None,
        name: Some("Newborn".to_string()),
        birthdate: None,
    };
    assert!(factory.create(&mut person).await.unwrap());
    assert_eq!(person.id(), Some("42".to_string()));
    assert!(!person.is_new());
}

#[tokio::test]
async fn create_folds_422_into_false_without_touching_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people.xml"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let mut person = Person::default();
    assert!(!factory.create(&mut person).await.unwrap());
    assert_eq!(person.id, None);
    assert!(person.is_new());
}

#[tokio::test]
async fn create_propagates_non_validation_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people.xml"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let mut person = Person::default();
    assert!(matches!(
        factory.create(&mut person).await,
        Err(ResourceError::ResourceConflict)
    ));
}

#[tokio::test]
async fn update_puts_to_the_member_path_and_ignores_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/people/5.xml"))
        .and(header("content-type", "application/xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let person = Person {
        id: Some(5),
        name: Some("Renamed".to_string()),
        birthdate: None,
    };
    assert!(factory.update(&person).await.unwrap());
}

#[tokio::test]
async fn update_folds_422_into_false() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/people/5.xml"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let person = Person {
        id: Some(5),
        name: None,
        birthdate: None,
    };
    assert!(!factory.update(&person).await.unwrap());
}

#[tokio::test]
async fn update_without_id_is_a_missing_id_error() {
    let server = MockServer::start().await;
    let factory = xml_factory(&server).await;
    assert!(matches!(
        factory.update(&Person::default()).await,
        Err(ResourceError::MissingId { operation: "update" })
    ));
}

#[tokio::test]
async fn save_dispatches_on_newness() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people.xml"))
        .respond_with(
            ResponseTemplate::new(201).set_body_raw(person_xml(8, "Fresh"), "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/people/8.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let mut person = Person {
        id: None,
        name: Some("Fresh".to_string()),
        birthdate: None,
    };
    // new: POST
    assert!(factory.save(&mut person).await.unwrap());
    assert_eq!(person.id, Some(8));
    // no longer new: PUT
    assert!(factory.save(&mut person).await.unwrap());
}

#[tokio::test]
async fn reload_merges_the_response_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/5.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<person><name>fresh name</name></person>",
            "application/xml",
        ))
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let mut person = Person {
        id: Some(5),
        name: Some("stale name".to_string()),
        birthdate: chrono::NaiveDate::from_ymd_opt(1990, 6, 1),
    };
    factory.reload(&mut person).await.unwrap();
    assert_eq!(person.id, Some(5));
    assert_eq!(person.name.as_deref(), Some("fresh name"));
    assert_eq!(person.birthdate, chrono::NaiveDate::from_ymd_opt(1990, 6, 1));
}

#[tokio::test]
async fn delete_issues_delete_to_the_member_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/people/5.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let factory = xml_factory(&server).await;
    let person = Person {
        id: Some(5),
        name: None,
        birthdate: None,
    };
    factory.delete(&person).await.unwrap();

    assert!(matches!(
        factory.delete(&Person::default()).await,
        Err(ResourceError::MissingId { operation: "delete" })
    ));
}

#[tokio::test]
async fn explicit_credentials_are_sent_as_basic_auth() {
    let server = MockServer::start().await;
    // "ace:secret"
    Mock::given(method("GET"))
        .and(path("/people/5.xml"))
        .and(header("Authorization", "Basic YWNlOnNlY3JldA=="))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(person_xml(5, "Ace"), "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let site = Url::parse(&server.uri()).unwrap();
    let mut connection = ResourceConnection::new(site).unwrap();
    connection.set_username("ace");
    connection.set_password("secret");
    let factory = ResourceFactory::<Person>::new(Arc::new(connection), ResourceFormat::Xml);
    assert!(factory.find("5").await.is_ok());
}

#[tokio::test]
async fn url_userinfo_credentials_are_used_when_no_explicit_ones() {
    let server = MockServer::start().await;
    // "Ace:newenglandclamchowder"
    Mock::given(method("GET"))
        .and(path("/people/1.xml"))
        .and(header(
            "Authorization",
            "Basic QWNlOm5ld2VuZ2xhbmRjbGFtY2hvd2Rlcg==",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(person_xml(1, "Ace"), "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut site = Url::parse(&server.uri()).unwrap();
    site.set_username("Ace").unwrap();
    site.set_password(Some("newenglandclamchowder")).unwrap();
    let connection = Arc::new(ResourceConnection::new(site).unwrap());
    let factory = ResourceFactory::<Person>::new(connection, ResourceFormat::Xml);
    assert!(factory.find("1").await.is_ok());
}

#[tokio::test]
async fn json_factory_speaks_json_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "{\"person\":{\"id\":1,\"name\":\"Alexander the Great\"}}",
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/people.json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            "{\"person\":{\"id\":2,\"name\":\"Saladin\"}}",
            "application/json",
        ))
        .mount(&server)
        .await;

    let site = Url::parse(&server.uri()).unwrap();
    let connection = Arc::new(ResourceConnection::new(site).unwrap());
    let factory = ResourceFactory::<Person>::new(connection, ResourceFormat::Json);

    let person = factory.find("1").await.unwrap();
    assert_eq!(person.name.as_deref(), Some("Alexander the Great"));

    let mut new_person = Person {
        id: None,
        name: Some("Saladin".to_string()),
        birthdate: None,
    };
    assert!(factory.create(&mut new_person).await.unwrap());
    assert_eq!(new_person.id, Some(2));
}
