mod create_reminder;
mod get_reminders;
mod send_due_reminders;

use actix_web::web;
use create_reminder::create_reminder_controller;
use get_reminders::get_reminders_controller;

pub use create_reminder::CreateReminderUseCase;
pub use get_reminders::GetRemindersUseCase;
pub use send_due_reminders::{PollOutcome, SendDueRemindersUseCase};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminders/{target_id}",
        web::get().to(get_reminders_controller),
    );
}
