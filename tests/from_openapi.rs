use openapi_clientgen::{generate, AppError, GenerateOptions, CLIENT_FILE, TYPES_FILE};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

const SPEC: &str = r#"
openapi: 3.0.3
info:
  title: User Service
  version: 1.2.0
paths:
  /users/{userId}:
    parameters:
      - name: userId
        in: path
        required: true
        schema:
          type: string
    get:
      operationId: getUser
      summary: Fetch a user
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
        '404':
          $ref: '#/components/responses/NotFound'
    delete:
      operationId: deleteUser
      responses:
        '204':
          description: Deleted
  /users:
    get:
      operationId: listUsers
      parameters:
        - name: tags
          in: query
          schema:
            type: array
            items:
              type: string
        - name: X-Request-Id
          in: header
          required: true
          schema:
            type: string
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/User'
    post:
      operationId: createUser
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name:
                  type: string
      responses:
        '201':
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
components:
  schemas:
    User:
      type: object
      description: A registered user
      required: [id, createdAt]
      properties:
        id:
          type: string
        createdAt:
          type: string
          format: date-time
        status:
          type: string
          enum: [active, banned]
        score:
          type: number
  responses:
    NotFound:
      description: The user does not exist
"#;

fn write_spec(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("openapi.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_generate_types_and_client() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(input_dir.path(), SPEC);

    let files = generate(&spec_path, output_dir.path(), &GenerateOptions::default()).unwrap();
    assert_eq!(files.types, output_dir.path().join(TYPES_FILE));
    assert_eq!(files.client, output_dir.path().join(CLIENT_FILE));
    assert_eq!(files.operation_count, 4);

    // User, UserStatus, NotFound, CreateUserBody
    assert_eq!(files.type_count, 4);

    let types = fs::read_to_string(&files.types).unwrap();
    assert!(types.contains("/// A registered user"));
    assert!(types.contains("pub struct User {"));
    assert!(types.contains("pub created_at: chrono::DateTime<chrono::Utc>,"));
    assert!(types.contains("pub score: Option<f64>,"));
    assert!(types.contains("pub status: Option<UserStatus>,"));
    assert!(types.contains("#[serde(rename = \"createdAt\")]"));
    assert!(types.contains("pub enum UserStatus {"));
    assert!(types.contains("pub type NotFound = serde_json::Value;"));
    assert!(types.contains("pub struct CreateUserBody {"));

    let user = types.find("pub struct User {").unwrap();
    let not_found = types.find("pub type NotFound").unwrap();
    let body = types.find("pub struct CreateUserBody").unwrap();
    assert!(user < not_found && not_found < body);

    let client = fs::read_to_string(&files.client).unwrap();
    assert!(client.contains("use crate::api::types::*;"));
    let order: Vec<usize> = ["fn get_user(", "fn delete_user(", "fn list_users(", "fn create_user("]
        .iter()
        .map(|needle| client.find(needle).unwrap())
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);

    assert!(client.contains("Result<Vec<User>>"));
    assert!(client.contains("tags: Option<&[String]>"));
    assert!(client.contains("x_request_id: &str"));
    assert!(client.contains("body: &CreateUserBody"));
    assert!(client.contains("Result<serde_json::Value>"));
}

#[test]
fn test_generation_is_deterministic() {
    let input_dir = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let spec_path = write_spec(input_dir.path(), SPEC);

    generate(&spec_path, first.path(), &GenerateOptions::default()).unwrap();
    generate(&spec_path, second.path(), &GenerateOptions::default()).unwrap();

    for file in [TYPES_FILE, CLIENT_FILE] {
        assert_eq!(
            fs::read_to_string(first.path().join(file)).unwrap(),
            fs::read_to_string(second.path().join(file)).unwrap()
        );
    }
}

#[test]
fn test_json_document_and_module_option() {
    let json = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Ping", "version": "0.1.0"},
  "paths": {
    "/ping": {
      "get": {
        "operationId": "ping",
        "responses": {"200": {"description": "pong"}}
      }
    }
  }
}"#;
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let spec_path = input_dir.path().join("openapi.json");
    fs::write(&spec_path, json).unwrap();

    let options = GenerateOptions {
        module: "ping_api".into(),
        ..Default::default()
    };
    let files = generate(&spec_path, output_dir.path(), &options).unwrap();
    assert_eq!(files.type_count, 0);

    let client = fs::read_to_string(files.client).unwrap();
    assert!(client.contains("use crate::ping_api::types::*;"));
    assert!(client.contains("pub async fn ping(&self) -> Result<serde_json::Value>"));
}

#[test]
fn test_client_template_override() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(input_dir.path(), SPEC);

    let template_path = input_dir.path().join("client.rs.hbs");
    fs::write(
        &template_path,
        "{{#each operations}}pub const {{name}}: &str = {{{url_format}}};\n{{/each}}",
    )
    .unwrap();

    let options = GenerateOptions {
        client_template: Some(template_path),
        ..Default::default()
    };
    let files = generate(&spec_path, output_dir.path(), &options).unwrap();
    let client = fs::read_to_string(files.client).unwrap();
    assert!(client.contains("pub const get_user: &str = \"{}/users/{}\";"));
    assert!(client.contains("pub const list_users: &str = \"{}/users\";"));
}

#[test]
fn test_missing_template_is_read_error() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(input_dir.path(), SPEC);

    let options = GenerateOptions {
        types_template: Some(input_dir.path().join("missing.hbs")),
        ..Default::default()
    };
    let err = generate(&spec_path, output_dir.path(), &options).unwrap_err();
    assert!(matches!(err, AppError::Read { .. }));
    assert!(!output_dir.path().join(TYPES_FILE).exists());
}

#[test]
fn test_invalid_documents_write_nothing() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let spec_path = write_spec(input_dir.path(), "openapi: 3.1.0\ninfo: {title: T, version: 1.0.0}\npaths: {}\n");
    let err = generate(&spec_path, output_dir.path(), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedVersion(_)));

    let spec_path = write_spec(
        input_dir.path(),
        r#"
openapi: 3.0.0
info: {title: T, version: 1.0.0}
paths:
  /ping:
    get:
      responses:
        '200': {description: OK}
"#,
    );
    let err = generate(&spec_path, output_dir.path(), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MissingOperationId { .. }));
    assert!(!output_dir.path().join(CLIENT_FILE).exists());

    let err = generate(
        &input_dir.path().join("nope.yaml"),
        output_dir.path(),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Read { .. }));
}

#[test]
fn test_unformatted_output() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(input_dir.path(), SPEC);

    let options = GenerateOptions {
        format: false,
        ..Default::default()
    };
    let files = generate(&spec_path, output_dir.path(), &options).unwrap();
    let types = fs::read_to_string(files.types).unwrap();
    assert!(types.contains("pub struct User {"));
}
