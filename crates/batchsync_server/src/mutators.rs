//! Todo mutation handlers.
//!
//! These are the domain writes behind the todo sample protocol:
//! create, partial-field update, and delete. Domain precondition
//! failures (bad id format, missing record, malformed args) are
//! permanent; store failures pass through untouched.

use crate::applier::{ApplyError, Mutator, MutatorRegistry};
use batchsync_protocol::{Todo, TodoDelete, TodoUpdate, TODO_ID_PREFIX};
use batchsync_store::{AccountId, Document, DocumentStore, StoreError};
use serde_json::{json, Value};

/// Builds the registry with all todo mutators installed.
pub fn todo_mutators() -> MutatorRegistry {
    MutatorRegistry::new()
        .register("createTodo", CreateTodo)
        .register("updateTodo", UpdateTodo)
        .register("deleteTodo", DeleteTodo)
}

fn deserialize_args<T: serde::de::DeserializeOwned>(args: &Value) -> Result<T, ApplyError> {
    serde_json::from_value(args.clone())
        .map_err(|e| ApplyError::permanent(format!("Could not deserialize arguments: {e}")))
}

fn todo_body(todo: &Todo) -> Value {
    json!({
        "id": todo.id,
        "title": todo.title,
        "order": todo.order,
        "complete": todo.complete,
    })
}

fn decode_todo(doc: Document) -> Result<Todo, ApplyError> {
    serde_json::from_value(doc.body).map_err(|e| {
        ApplyError::Store(StoreError::Corrupt {
            id: doc.id,
            reason: e.to_string(),
        })
    })
}

/// Creates a new todo document.
pub struct CreateTodo;

impl Mutator for CreateTodo {
    fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        args: &Value,
    ) -> Result<(), ApplyError> {
        let todo: Todo = deserialize_args(args)?;

        if !todo.has_valid_id() {
            return Err(ApplyError::permanent(format!(
                "Invalid id: must start with '{TODO_ID_PREFIX}'"
            )));
        }

        // A conflicting id will conflict on every retry too.
        match store.create(account, Document::new(todo.id.clone(), todo_body(&todo))) {
            Err(StoreError::AlreadyExists { id }) => {
                Err(ApplyError::permanent(format!("todo already exists: {id}")))
            }
            other => Ok(other?),
        }
    }
}

/// Applies a partial-field update to an existing todo.
pub struct UpdateTodo;

impl Mutator for UpdateTodo {
    fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        args: &Value,
    ) -> Result<(), ApplyError> {
        let input: TodoUpdate = deserialize_args(args)?;

        let doc = store
            .get(account, &input.id)?
            .ok_or_else(|| ApplyError::permanent("specified todo not found"))?;
        let mut todo = decode_todo(doc)?;

        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(order) = input.order {
            todo.order = order;
        }
        if let Some(complete) = input.complete {
            todo.complete = complete;
        }

        store.upsert(account, Document::new(todo.id.clone(), todo_body(&todo)))?;
        Ok(())
    }
}

/// Deletes a todo. Deleting an absent todo is a no-op.
pub struct DeleteTodo;

impl Mutator for DeleteTodo {
    fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        args: &Value,
    ) -> Result<(), ApplyError> {
        let input: TodoDelete = deserialize_args(args)?;

        if store.get(account, &input.id)?.is_some() {
            store.delete(account, &input.id)?;
        }
        Ok(())
    }
}
