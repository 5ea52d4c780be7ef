use crate::common::{
    ApiCommand, ApiEvent, ApiOutcome, ApiRequest, MessageTemplate, TemplateDraft, TemplateId,
    ViewKind,
};

use super::request::{LoadState, RequestTracker};

pub const LOAD_ERROR: &str = "Şablonlar yüklenirken bir hata oluştu.";
pub const SAVE_ERROR: &str = "Şablon kaydedilirken bir hata oluştu.";
pub const DELETE_ERROR: &str = "Şablon silinirken bir hata oluştu.";
pub const DELETE_PROMPT: &str = "Bu şablonu silmek istediğinizden emin misiniz?";

/// Fields shared by the create and edit dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateForm {
    pub trigger_text: String,
    pub response_text: String,
    pub is_active: bool,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            trigger_text: String::new(),
            response_text: String::new(),
            is_active: true,
        }
    }
}

impl TemplateForm {
    fn from_template(template: &MessageTemplate) -> Self {
        Self {
            trigger_text: template.trigger_text.clone(),
            response_text: template.response_text.clone(),
            is_active: template.is_active,
        }
    }

    /// A trigger must contain something to match against.
    pub fn is_submittable(&self) -> bool {
        !self.trigger_text.trim().is_empty()
    }

    fn to_draft(&self) -> TemplateDraft {
        TemplateDraft {
            trigger_text: self.trigger_text.clone(),
            response_text: self.response_text.clone(),
            is_active: self.is_active,
        }
    }
}

/// Modal editor. `editing == None` means a new template is being created.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub editing: Option<MessageTemplate>,
    pub form: TemplateForm,
    pub saving: bool,
}

impl Editor {
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Şablon Düzenle"
        } else {
            "Yeni Şablon"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow<'a> {
    pub id: TemplateId,
    pub trigger: &'a str,
    pub response: &'a str,
    pub status: &'static str,
}

pub struct TemplatesView {
    tracker: RequestTracker,
    // Save and delete are tracked apart from the list fetch so a refetch
    // never makes a mutation result look stale.
    mutations: RequestTracker,
    state: LoadState<Vec<MessageTemplate>>,
    editor: Option<Editor>,
    pending_delete: Option<TemplateId>,
}

impl TemplatesView {
    pub fn new() -> Self {
        Self {
            tracker: RequestTracker::new(ViewKind::Templates),
            mutations: RequestTracker::new(ViewKind::Templates),
            state: LoadState::Idle,
            editor: None,
            pending_delete: None,
        }
    }

    pub fn activate(&mut self) -> ApiCommand {
        self.state = LoadState::Loading;
        self.tracker.issue(ApiRequest::ListTemplates)
    }

    pub fn deactivate(&mut self) -> ApiCommand {
        self.editor = None;
        self.pending_delete = None;
        self.mutations.invalidate();
        self.tracker.invalidate()
    }

    // The current list stays on screen while the reload is in flight.
    fn refetch(&mut self) -> ApiCommand {
        self.tracker.issue(ApiRequest::ListTemplates)
    }

    pub fn state(&self) -> &LoadState<Vec<MessageTemplate>> {
        &self.state
    }

    pub fn rows(&self) -> Vec<TemplateRow<'_>> {
        self.state
            .ready()
            .map(|templates| {
                templates
                    .iter()
                    .map(|template| TemplateRow {
                        id: template.id,
                        trigger: &template.trigger_text,
                        response: &template.response_text,
                        status: if template.is_active { "Aktif" } else { "Pasif" },
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn template(&self, id: TemplateId) -> Option<&MessageTemplate> {
        self.state.ready()?.iter().find(|template| template.id == id)
    }

    /// At most one save or delete runs at a time.
    pub fn mutation_pending(&self) -> bool {
        self.mutations.in_flight()
    }

    fn refuse_while_pending(&self, action: &str) -> bool {
        if self.mutation_pending() {
            log::debug!("Templates refusing {action}: a save or delete is still running");
            return true;
        }
        false
    }

    pub fn open_create(&mut self) {
        if self.refuse_while_pending("create") {
            return;
        }
        self.editor = Some(Editor {
            editing: None,
            form: TemplateForm::default(),
            saving: false,
        });
    }

    pub fn open_edit(&mut self, template: MessageTemplate) {
        if self.refuse_while_pending("edit") {
            return;
        }
        self.editor = Some(Editor {
            form: TemplateForm::from_template(&template),
            editing: Some(template),
            saving: false,
        });
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    #[cfg(test)]
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }

    /// Sends create or update depending on the editor mode. The editor stays
    /// open until the backend answers.
    pub fn submit(&mut self) -> Option<ApiCommand> {
        if self.refuse_while_pending("save") {
            return None;
        }
        let editor = self.editor.as_mut()?;
        if editor.saving || !editor.form.is_submittable() {
            return None;
        }
        editor.saving = true;

        let draft = editor.form.to_draft();
        let request = match &editor.editing {
            Some(template) => ApiRequest::UpdateTemplate {
                id: template.id,
                patch: draft.into(),
            },
            None => ApiRequest::CreateTemplate(draft),
        };
        Some(self.mutations.issue(request))
    }

    pub fn request_delete(&mut self, id: TemplateId) {
        if self.refuse_while_pending("delete") {
            return;
        }
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<TemplateId> {
        self.pending_delete
    }

    /// Answer to the confirmation prompt. Declining sends nothing.
    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<ApiCommand> {
        let id = self.pending_delete.take()?;
        if !confirmed {
            return None;
        }
        Some(self.mutations.issue(ApiRequest::DeleteTemplate(id)))
    }

    pub fn apply(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        let accepted = match &event.outcome {
            ApiOutcome::TemplateSaved(_) | ApiOutcome::TemplateDeleted(_) => {
                self.mutations.complete(event.ticket)
            }
            _ => self.tracker.accepts(event.ticket),
        };
        if !accepted {
            log::debug!("Templates ignoring stale result #{}", event.ticket.token);
            return None;
        }
        match event.outcome {
            ApiOutcome::Templates(Ok(templates)) => {
                self.state = LoadState::Ready(templates);
                None
            }
            ApiOutcome::Templates(Err(err)) => self.fail(LOAD_ERROR, err),
            ApiOutcome::TemplateSaved(Ok(saved)) => {
                log::info!("Template {} saved", saved.id);
                self.editor = None;
                Some(self.refetch())
            }
            ApiOutcome::TemplateSaved(Err(err)) => self.fail(SAVE_ERROR, err),
            ApiOutcome::TemplateDeleted(Ok(())) => Some(self.refetch()),
            ApiOutcome::TemplateDeleted(Err(err)) => self.fail(DELETE_ERROR, err),
            other => {
                log::warn!("Templates got unexpected outcome {other:?}");
                None
            }
        }
    }

    fn fail(&mut self, message: &str, err: impl std::fmt::Display) -> Option<ApiCommand> {
        log::warn!("{message} ({err})");
        self.editor = None;
        self.pending_delete = None;
        self.state = LoadState::Error(message.to_string());
        None
    }
}

impl Default for TemplatesView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::common::{TemplatePatch, Ticket};
    use crate::views::request::ticket_of;

    fn hi_template() -> MessageTemplate {
        MessageTemplate {
            id: 1,
            trigger_text: "hi".into(),
            response_text: "hello".into(),
            is_active: true,
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: None,
        }
    }

    fn loaded() -> TemplatesView {
        let mut view = TemplatesView::new();
        let ticket = ticket_of(&view.activate());
        assert!(
            view.apply(ApiEvent {
                ticket,
                outcome: ApiOutcome::Templates(Ok(vec![hi_template()])),
            })
            .is_none()
        );
        view
    }

    fn is_list_fetch(command: &ApiCommand) -> bool {
        matches!(
            command,
            ApiCommand::Request {
                request: ApiRequest::ListTemplates,
                ..
            }
        )
    }

    fn saved(ticket: Ticket) -> ApiEvent {
        ApiEvent {
            ticket,
            outcome: ApiOutcome::TemplateSaved(Ok(hi_template())),
        }
    }

    #[test]
    fn loaded_list_projects_rows() {
        let view = loaded();

        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trigger, "hi");
        assert_eq!(rows[0].response, "hello");
        assert_eq!(rows[0].status, "Aktif");
    }

    #[test]
    fn create_submit_refetches_exactly_once() {
        let mut view = loaded();
        view.open_create();
        assert_eq!(view.editor().expect("editor").title(), "Yeni Şablon");
        {
            let form = &mut view.editor_mut().expect("editor").form;
            assert!(form.is_active);
            form.trigger_text = "fiyat".into();
            form.response_text = "Fiyatlar sitede".into();
        }

        let command = view.submit().expect("create");
        match &command {
            ApiCommand::Request {
                request: ApiRequest::CreateTemplate(draft),
                ..
            } => assert_eq!(draft.trigger_text, "fiyat"),
            other => panic!("expected create, got {other:?}"),
        }
        assert!(view.submit().is_none(), "double submit while saving");

        let follow_up = view.apply(saved(ticket_of(&command))).expect("refetch");
        assert!(is_list_fetch(&follow_up));
        assert!(view.editor().is_none());
        assert!(view.apply(saved(ticket_of(&command))).is_none());
    }

    #[test]
    fn edit_submit_sends_update_and_refetches_once() {
        let mut view = loaded();
        let template = view.template(1).cloned().expect("template");
        view.open_edit(template);
        assert_eq!(view.editor().expect("editor").title(), "Şablon Düzenle");
        view.editor_mut().expect("editor").form.is_active = false;

        let command = view.submit().expect("update");
        match &command {
            ApiCommand::Request {
                request: ApiRequest::UpdateTemplate { id, patch },
                ..
            } => {
                assert_eq!(*id, 1);
                assert_eq!(
                    patch,
                    &TemplatePatch {
                        trigger_text: Some("hi".into()),
                        response_text: Some("hello".into()),
                        is_active: Some(false),
                    }
                );
            }
            other => panic!("expected update, got {other:?}"),
        }

        let follow_up = view.apply(saved(ticket_of(&command))).expect("refetch");
        assert!(is_list_fetch(&follow_up));
        assert!(view.editor().is_none());
    }

    #[test]
    fn blank_trigger_is_not_submitted() {
        let mut view = loaded();
        view.open_create();
        view.editor_mut().expect("editor").form.trigger_text = "   ".into();

        assert!(view.submit().is_none());
    }

    #[test]
    fn cancelling_editor_sends_nothing() {
        let mut view = loaded();
        view.open_create();
        view.close_editor();

        assert!(view.editor().is_none());
        assert!(view.submit().is_none());
    }

    #[test]
    fn declined_delete_issues_nothing() {
        let mut view = loaded();
        view.request_delete(1);
        assert_eq!(view.pending_delete(), Some(1));

        assert!(view.resolve_delete(false).is_none());
        assert_eq!(view.pending_delete(), None);
    }

    #[test]
    fn confirmed_delete_then_refetch() {
        let mut view = loaded();
        view.request_delete(1);

        let command = view.resolve_delete(true).expect("delete");
        assert!(matches!(
            command,
            ApiCommand::Request {
                request: ApiRequest::DeleteTemplate(1),
                ..
            }
        ));

        let follow_up = view
            .apply(ApiEvent {
                ticket: ticket_of(&command),
                outcome: ApiOutcome::TemplateDeleted(Ok(())),
            })
            .expect("refetch");
        assert!(is_list_fetch(&follow_up));
    }

    #[test]
    fn save_failure_replaces_view_with_error() {
        let mut view = loaded();
        view.open_create();
        view.editor_mut().expect("editor").form.trigger_text = "x".into();
        let command = view.submit().expect("create");

        let follow_up = view.apply(ApiEvent {
            ticket: ticket_of(&command),
            outcome: ApiOutcome::TemplateSaved(Err(ApiError::MissingData)),
        });

        assert!(follow_up.is_none());
        assert!(view.editor().is_none());
        assert_eq!(view.state(), &LoadState::Error(SAVE_ERROR.to_string()));
        assert!(view.rows().is_empty());
    }

    #[test]
    fn load_failure_shows_error() {
        let mut view = TemplatesView::new();
        let ticket = ticket_of(&view.activate());

        view.apply(ApiEvent {
            ticket,
            outcome: ApiOutcome::Templates(Err(ApiError::Rejected { message: None })),
        });

        assert_eq!(view.state(), &LoadState::Error(LOAD_ERROR.to_string()));
    }

    #[test]
    fn stale_list_is_ignored_after_refetch() {
        let mut view = TemplatesView::new();
        let stale = ticket_of(&view.activate());
        view.request_delete(1);
        let delete = view.resolve_delete(true).expect("delete");
        let refetch = view
            .apply(ApiEvent {
                ticket: ticket_of(&delete),
                outcome: ApiOutcome::TemplateDeleted(Ok(())),
            })
            .expect("refetch");

        view.apply(ApiEvent {
            ticket: ticket_of(&refetch),
            outcome: ApiOutcome::Templates(Ok(Vec::new())),
        });
        view.apply(ApiEvent {
            ticket: stale,
            outcome: ApiOutcome::Templates(Ok(vec![hi_template()])),
        });

        assert_eq!(view.state(), &LoadState::Ready(Vec::new()));
    }

    #[test]
    fn save_result_survives_a_delete_attempt_made_while_saving() {
        let mut view = loaded();
        let template = view.template(1).cloned().expect("template");
        view.open_edit(template);
        let save = view.submit().expect("update");
        assert!(view.mutation_pending());

        view.request_delete(1);
        assert_eq!(view.pending_delete(), None);
        assert!(view.resolve_delete(true).is_none());

        let follow_up = view.apply(saved(ticket_of(&save)));
        assert!(follow_up.as_ref().is_some_and(is_list_fetch));
        assert!(view.editor().is_none());
        assert!(!view.mutation_pending());
    }

    #[test]
    fn save_result_is_applied_after_a_list_refetch_was_issued() {
        let mut view = loaded();
        view.open_create();
        view.editor_mut().expect("editor").form.trigger_text = "fiyat".into();
        let save = view.submit().expect("create");
        // Navigating back to the view issues a fresh list fetch.
        let list = view.activate();
        assert!(is_list_fetch(&list));

        let follow_up = view.apply(saved(ticket_of(&save)));

        assert!(follow_up.is_some());
        assert!(view.editor().is_none());
    }

    #[test]
    fn delete_failure_is_reported_even_if_create_was_clicked_meanwhile() {
        let mut view = loaded();
        view.request_delete(1);
        let delete = view.resolve_delete(true).expect("delete");

        view.open_create();
        assert!(view.editor().is_none());
        assert!(view.submit().is_none());

        view.apply(ApiEvent {
            ticket: ticket_of(&delete),
            outcome: ApiOutcome::TemplateDeleted(Err(ApiError::MissingData)),
        });

        assert_eq!(view.state(), &LoadState::Error(DELETE_ERROR.to_string()));
        assert!(!view.mutation_pending());
    }

    #[test]
    fn leaving_the_view_drops_a_running_save() {
        let mut view = loaded();
        view.open_create();
        view.editor_mut().expect("editor").form.trigger_text = "x".into();
        let save = view.submit().expect("create");

        assert_eq!(view.deactivate(), ApiCommand::Cancel(ViewKind::Templates));
        assert!(!view.mutation_pending());
        assert!(view.apply(saved(ticket_of(&save))).is_none());
    }
}
