//! taskflow demo - run a scripted task lifecycle through the command core

use clap::Args;

use taskflow_domain::{ClientCreated, ClientId, DomainEvent, EntityRef, User, UserId};
use taskflow_usecase::{
    AssignTask, AssignTaskHandler, ChangeTaskStatus, ChangeTaskStatusHandler, CommandHandler,
    CompleteTask, CompleteTaskHandler, CreateTask, CreateTaskHandler,
};

use crate::wiring::App;

const ALICE: i64 = 1;
const BOB: i64 = 2;
const CAROL: i64 = 3;

#[derive(Debug, Args)]
pub struct DemoCommand {
    /// Title of the task the demo creates
    #[arg(long, default_value = "Ship release")]
    pub title: String,

    /// Priority literal (low, medium, high, urgent)
    #[arg(long, default_value = "urgent")]
    pub priority: String,
}

impl DemoCommand {
    pub fn run(&self, app: &App) -> anyhow::Result<()> {
        for (id, name) in [(ALICE, "Alice"), (BOB, "Bob"), (CAROL, "Carol")] {
            app.users.insert(User::new(UserId::from_int(id)?, name))?;
        }

        let deps = &app.deps;

        println!("📋 Creating task...");
        let task_id = CreateTaskHandler::new(deps.clone()).handle(
            CreateTask::new(&self.title, &self.priority, ALICE, BOB)
                .with_description("Tag, build and publish")
                .with_tags([1]),
        )?;
        println!("   ✓ Task {} created, assigned to Bob", task_id);

        AssignTaskHandler::new(deps.clone())
            .handle(AssignTask::new(task_id.as_int(), CAROL, BOB))?;
        println!("   ✓ Bob handed task {} to Carol", task_id);

        let status = ChangeTaskStatusHandler::new(deps.clone());
        status.handle(ChangeTaskStatus::new(task_id.as_int(), "in_progress", CAROL))?;
        println!("   ✓ Carol started work");

        match status.handle(ChangeTaskStatus::new(task_id.as_int(), "in_progress", CAROL)) {
            Ok(_) => println!("   ✗ Repeated transition was accepted"),
            Err(e) => println!("   ✓ Repeated transition rejected: {}", e),
        }

        let completed = CompleteTaskHandler::new(deps.clone())
            .handle(CompleteTask::new(task_id.as_int(), CAROL))?;
        println!("   ✓ Completed at {}", completed.completed_at().to_rfc3339());

        // Non-task events travel the same store-then-dispatch path
        let client = DomainEvent::from(ClientCreated::new(
            ClientId::from_int(1)?,
            "Acme Corp",
            UserId::from_int(ALICE)?,
            deps.clock.as_ref(),
        ));
        app.events.append(&client)?;
        deps.bus.dispatch(&client);
        println!("   ✓ Client created");

        let audit = app
            .audit
            .lock()
            .map_err(|_| anyhow::anyhow!("audit logger lock poisoned"))?;

        println!();
        println!("🧾 Audit trail for task {}:", task_id);
        for entry in audit.entries_for(EntityRef::task(task_id)) {
            println!("   {}  {}", entry.timestamp.to_rfc3339(), entry.event_name);
        }

        println!();
        println!("{}", serde_json::to_string_pretty(&audit.get_stats())?);
        Ok(())
    }
}
