use async_trait::async_trait;
use models::procedure::ProcedureCall;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, JsonValue, RuntimeErr, Statement,
};

use crate::errors::ServiceError;

/// The database as seen by the façade: run one named procedure, get its first result set.
#[async_trait]
pub trait ProcedureExecutor: Send + Sync {
    async fn call(&self, call: ProcedureCall) -> Result<Vec<JsonValue>, ServiceError>;

    /// Round-trip a trivial query to prove a connection can be acquired.
    async fn ping(&self) -> Result<(), ServiceError>;
}

/// SeaORM-backed executor over a pooled connection.
pub struct SeaOrmProcedureExecutor {
    pub db: DatabaseConnection,
}

impl SeaOrmProcedureExecutor {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProcedureExecutor for SeaOrmProcedureExecutor {
    async fn call(&self, call: ProcedureCall) -> Result<Vec<JsonValue>, ServiceError> {
        let stmt = call.into_statement(self.db.get_database_backend());
        JsonValue::find_by_statement(stmt).all(&self.db).await.map_err(classify_db_err)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        let stmt = Statement::from_string(self.db.get_database_backend(), "SELECT 1 + 1 AS solution");
        self.db.query_one(stmt).await.map_err(classify_db_err)?;
        Ok(())
    }
}

/// Split database failures into vendor-coded procedure errors, connection failures and the rest.
pub fn classify_db_err(err: DbErr) -> ServiceError {
    if let Some((code, message)) = sql_state(&err) {
        return ServiceError::Procedure { code, message };
    }
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ServiceError::Connection(err.to_string()),
        other => ServiceError::Db(other.to_string()),
    }
}

fn sql_state(err: &DbErr) -> Option<(String, String)> {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) | DbErr::Conn(e) => e,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db)) => {
            let code = db.code()?.into_owned();
            Some((code, db.message().to_string()))
        }
        _ => None,
    }
}

/// Scripted in-memory executor for tests. Records every call it receives.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Responder = Arc<dyn Fn(&ProcedureCall) -> Result<Vec<JsonValue>, ServiceError> + Send + Sync>;

    #[derive(Default)]
    pub struct MockProcedureExecutor {
        responders: HashMap<&'static str, Responder>,
        calls: Mutex<Vec<ProcedureCall>>,
        ping_error: Option<String>,
        delay: Option<Duration>,
    }

    impl MockProcedureExecutor {
        pub fn new() -> Self { Self::default() }

        pub fn with_rows(self, procedure: &'static str, rows: Vec<JsonValue>) -> Self {
            self.with_responder(procedure, move |_| Ok(rows.clone()))
        }

        pub fn with_vendor_error(self, procedure: &'static str, code: &str, message: &str) -> Self {
            let (code, message) = (code.to_string(), message.to_string());
            self.with_responder(procedure, move |_| Err(ServiceError::procedure(code.clone(), message.clone())))
        }

        pub fn with_db_error(self, procedure: &'static str, message: &str) -> Self {
            let message = message.to_string();
            self.with_responder(procedure, move |_| Err(ServiceError::Db(message.clone())))
        }

        pub fn with_connection_error(self, procedure: &'static str, message: &str) -> Self {
            let message = message.to_string();
            self.with_responder(procedure, move |_| Err(ServiceError::Connection(message.clone())))
        }

        pub fn with_responder<F>(mut self, procedure: &'static str, f: F) -> Self
        where
            F: Fn(&ProcedureCall) -> Result<Vec<JsonValue>, ServiceError> + Send + Sync + 'static,
        {
            self.responders.insert(procedure, Arc::new(f));
            self
        }

        pub fn with_failing_ping(mut self, message: &str) -> Self {
            self.ping_error = Some(message.to_string());
            self
        }

        /// Sleep before answering, so concurrent requests actually overlap.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<ProcedureCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls_to(&self, procedure: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| c.name() == procedure).count()
        }
    }

    #[async_trait]
    impl ProcedureExecutor for MockProcedureExecutor {
        async fn call(&self, call: ProcedureCall) -> Result<Vec<JsonValue>, ServiceError> {
            self.calls.lock().unwrap().push(call.clone());
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            match self.responders.get(call.name()) {
                Some(respond) => respond(&call),
                None => Ok(Vec::new()),
            }
        }

        async fn ping(&self) -> Result<(), ServiceError> {
            match &self.ping_error {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(()),
            }
        }
    }
}
