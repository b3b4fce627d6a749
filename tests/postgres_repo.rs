use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use todo_api::domain::error::TodoError;
use todo_api::domain::repository::TodoRepository;
use todo_api::domain::todo::{NewTodo, Todo, TodoFilter, TodoId, UpdateTodo};
use todo_api::infrastructure::postgres_repo::PostgresTodoRepository;

async fn start_postgres() -> (ContainerAsync<Postgres>, String) {
    let container = Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    // the container has no TLS, so the URL opts out of the required default
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres?sslmode=disable");
    (container, url)
}

async fn repo(url: &str) -> PostgresTodoRepository {
    let repo = PostgresTodoRepository::connect(url).await.unwrap();
    repo.init().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn postgres_crud_scenarios() {
    let (_container, url) = start_postgres().await;
    let repo = repo(&url).await;
    repo.init().await.unwrap();

    let milk = repo.create(NewTodo { id: Some(99), content: "buy milk".into() }).await.unwrap();
    let dog = repo.create(NewTodo::new("walk dog")).await.unwrap();
    assert_ne!(milk.id, TodoId(99));
    assert!(dog.id.0 > milk.id.0);
    assert_eq!(repo.list().await.unwrap(), vec![milk.clone(), dog.clone()]);

    assert_eq!(repo.filter(TodoFilter::ById(milk.id)).await.unwrap(), vec![milk.clone()]);
    assert_eq!(repo.filter(TodoFilter::ByContent("walk dog".into())).await.unwrap(), vec![dog.clone()]);
    assert!(repo.filter(TodoFilter::ByContent("nonexistent".into())).await.unwrap().is_empty());

    let err = repo.update(milk.id, UpdateTodo::new("")).await.unwrap_err();
    assert!(matches!(err, TodoError::InvalidArgument(_)));
    assert_eq!(repo.filter(TodoFilter::ById(milk.id)).await.unwrap(), vec![milk.clone()]);

    let err = repo.update(TodoId(10_000), UpdateTodo::new("")).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(TodoId(10_000))));
    let err = repo.update(TodoId(10_000), UpdateTodo::new("x")).await.unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));

    let updated = repo.update(milk.id, UpdateTodo::new("buy oat milk")).await.unwrap();
    assert_eq!(updated, Todo { id: milk.id, content: "buy oat milk".into() });

    assert_eq!(repo.delete(dog.id).await.unwrap(), dog);
    assert!(matches!(repo.delete(dog.id).await, Err(TodoError::NotFound(_))));
    assert_eq!(repo.list().await.unwrap(), vec![updated]);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn postgres_reuses_table_with_int4_ids() {
    let (_container, url) = start_postgres().await;
    let pool = sqlx::PgPool::connect(&url).await.unwrap();
    sqlx::query("CREATE TABLE todo (id SERIAL NOT NULL, content VARCHAR NOT NULL, PRIMARY KEY (id))")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO todo (content) VALUES ('from before')").execute(&pool).await.unwrap();
    pool.close().await;

    let repo = repo(&url).await;
    let created = repo.create(NewTodo::new("buy milk")).await.unwrap();
    assert_eq!(created.id, TodoId(2));

    let all = repo.list().await.unwrap();
    assert_eq!(all, vec![Todo { id: TodoId(1), content: "from before".into() }, created.clone()]);
    assert_eq!(repo.update(TodoId(1), UpdateTodo::new("edited")).await.unwrap().content, "edited");
    assert_eq!(repo.delete(created.id).await.unwrap(), created);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn postgres_concurrent_updates_all_succeed() {
    let (_container, url) = start_postgres().await;
    let repo = repo(&url).await;
    let todo = repo.create(NewTodo::new("v0")).await.unwrap();

    let handles: Vec<_> = (1..=50)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.update(todo.id, UpdateTodo::new(format!("v{i}"))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_ne!(repo.list().await.unwrap()[0].content, "v0");
}
