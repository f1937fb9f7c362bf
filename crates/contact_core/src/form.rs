/// Value carried by a single form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Text(String),
    Password(String),
    TextArea(String),
    /// Submitted like text, but untouched by [`FormFieldSet::clear`].
    Hidden(String),
    /// `value: None` submits as `on` when checked.
    Checkbox { value: Option<String>, checked: bool },
    Radio { value: Option<String>, checked: bool },
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

impl Control {
    /// The value this control contributes to a submission, if any.
    pub fn successful_value(&self) -> Option<&str> {
        match self {
            Control::Text(value)
            | Control::Password(value)
            | Control::TextArea(value)
            | Control::Hidden(value) => Some(value),
            Control::Checkbox { value, checked } | Control::Radio { value, checked } => {
                checked.then(|| value.as_deref().unwrap_or("on"))
            }
            Control::Select { options, selected } => {
                selected.and_then(|index| options.get(index)).map(String::as_str)
            }
        }
    }

    fn clear(&mut self) {
        match self {
            Control::Text(value) | Control::Password(value) | Control::TextArea(value) => {
                value.clear();
            }
            Control::Checkbox { checked, .. } | Control::Radio { checked, .. } => *checked = false,
            Control::Select { selected, .. } => *selected = None,
            Control::Hidden(_) => {}
        }
    }

    fn is_cleared(&self) -> bool {
        match self {
            Control::Text(value) | Control::Password(value) | Control::TextArea(value) => {
                value.is_empty()
            }
            Control::Checkbox { checked, .. } | Control::Radio { checked, .. } => !checked,
            Control::Select { selected, .. } => selected.is_none(),
            Control::Hidden(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub control: Control,
}

/// A control, or a group (fieldset) of further nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNode {
    Field(Field),
    Group {
        legend: String,
        children: Vec<FormNode>,
    },
}

/// A user edit to the live form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Set the first text-like control named `name`.
    SetText { name: String, value: String },
    /// Check or uncheck a checkbox/radio. `value: None` matches the first
    /// control with that name. Checking a radio unchecks its siblings.
    SetChecked {
        name: String,
        value: Option<String>,
        checked: bool,
    },
    /// Select an option by index, or clear the selection.
    Select { name: String, index: Option<usize> },
}

/// Ordered, possibly nested, set of named form controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFieldSet {
    nodes: Vec<FormNode>,
}

impl FormFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard contact form layout: `name`, `email`, `subject` and a
    /// `message` body.
    pub fn contact(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self::new()
            .text("name", name)
            .text("email", email)
            .text("subject", subject)
            .textarea("message", message)
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.push(name, Control::Text(value.to_string()))
    }

    pub fn password(self, name: &str, value: &str) -> Self {
        self.push(name, Control::Password(value.to_string()))
    }

    pub fn textarea(self, name: &str, value: &str) -> Self {
        self.push(name, Control::TextArea(value.to_string()))
    }

    pub fn hidden(self, name: &str, value: &str) -> Self {
        self.push(name, Control::Hidden(value.to_string()))
    }

    pub fn checkbox(self, name: &str, value: Option<&str>, checked: bool) -> Self {
        self.push(
            name,
            Control::Checkbox {
                value: value.map(ToOwned::to_owned),
                checked,
            },
        )
    }

    pub fn radio(self, name: &str, value: &str, checked: bool) -> Self {
        self.push(
            name,
            Control::Radio {
                value: Some(value.to_string()),
                checked,
            },
        )
    }

    pub fn select(self, name: &str, options: &[&str], selected: Option<usize>) -> Self {
        self.push(
            name,
            Control::Select {
                options: options.iter().map(|option| option.to_string()).collect(),
                selected,
            },
        )
    }

    /// Nest `inner` as a group.
    pub fn group(mut self, legend: &str, inner: FormFieldSet) -> Self {
        self.nodes.push(FormNode::Group {
            legend: legend.to_string(),
            children: inner.nodes,
        });
        self
    }

    fn push(mut self, name: &str, control: Control) -> Self {
        self.nodes.push(FormNode::Field(Field {
            name: name.to_string(),
            control,
        }));
        self
    }

    pub fn nodes(&self) -> &[FormNode] {
        &self.nodes
    }

    /// All controls in document order, flattening groups.
    pub fn fields(&self) -> Vec<&Field> {
        let mut out = Vec::new();
        collect_fields(&self.nodes, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First successful value submitted under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .filter(|field| field.name == name)
            .find_map(|field| field.control.successful_value())
    }

    /// The `(name, value)` pairs a submission carries, in document order.
    /// Unnamed controls, unchecked boxes and empty selects are skipped.
    pub fn successful_pairs(&self) -> Vec<(&str, &str)> {
        self.fields()
            .into_iter()
            .filter(|field| !field.name.is_empty())
            .filter_map(|field| {
                field
                    .control
                    .successful_value()
                    .map(|value| (field.name.as_str(), value))
            })
            .collect()
    }

    /// Reset every control, descending into groups. Hidden controls keep
    /// their value.
    pub fn clear(&mut self) {
        visit_fields_mut(&mut self.nodes, &mut |field| field.control.clear());
    }

    pub fn is_cleared(&self) -> bool {
        self.fields()
            .into_iter()
            .all(|field| field.control.is_cleared())
    }

    /// Apply a user edit. Returns `true` if any control changed.
    pub fn apply(&mut self, edit: &FieldEdit) -> bool {
        match edit {
            FieldEdit::SetText { name, value } => {
                let mut target = None;
                visit_fields_mut(&mut self.nodes, &mut |field| {
                    if target.is_some() || field.name != *name {
                        return;
                    }
                    if let Control::Text(current)
                    | Control::Password(current)
                    | Control::TextArea(current)
                    | Control::Hidden(current) = &mut field.control
                    {
                        target = Some(current != value);
                        *current = value.clone();
                    }
                });
                target.unwrap_or(false)
            }
            FieldEdit::SetChecked {
                name,
                value,
                checked,
            } => self.set_checked(name, value.as_deref(), *checked),
            FieldEdit::Select { name, index } => {
                let mut changed = false;
                let mut done = false;
                visit_fields_mut(&mut self.nodes, &mut |field| {
                    if done || field.name != *name {
                        return;
                    }
                    if let Control::Select { options, selected } = &mut field.control {
                        done = true;
                        if index.is_some_and(|index| index >= options.len()) {
                            return;
                        }
                        changed = *selected != *index;
                        *selected = *index;
                    }
                });
                changed
            }
        }
    }

    fn set_checked(&mut self, name: &str, value: Option<&str>, checked: bool) -> bool {
        let mut target_is_radio = false;
        let mut found = false;
        let mut changed = false;
        visit_fields_mut(&mut self.nodes, &mut |field| {
            if found || field.name != name {
                return;
            }
            let (is_radio, current_value, current_checked) = match &mut field.control {
                Control::Checkbox { value, checked } => (false, value.as_deref(), checked),
                Control::Radio { value, checked } => (true, value.as_deref(), checked),
                _ => return,
            };
            if value.is_some() && current_value.unwrap_or("on") != value.unwrap_or_default() {
                return;
            }
            found = true;
            target_is_radio = is_radio;
            changed = *current_checked != checked;
            *current_checked = checked;
        });
        if !found {
            return false;
        }

        if target_is_radio && checked {
            let mut seen_target = false;
            visit_fields_mut(&mut self.nodes, &mut |field| {
                if field.name != name {
                    return;
                }
                if let Control::Radio {
                    value: radio_value,
                    checked: radio_checked,
                } = &mut field.control
                {
                    let is_target = !seen_target
                        && (value.is_none()
                            || radio_value.as_deref().unwrap_or("on") == value.unwrap_or_default());
                    if is_target {
                        seen_target = true;
                    } else if *radio_checked {
                        *radio_checked = false;
                        changed = true;
                    }
                }
            });
        }
        changed
    }
}

fn collect_fields<'a>(nodes: &'a [FormNode], out: &mut Vec<&'a Field>) {
    for node in nodes {
        match node {
            FormNode::Field(field) => out.push(field),
            FormNode::Group { children, .. } => collect_fields(children, out),
        }
    }
}

fn visit_fields_mut(nodes: &mut [FormNode], visit: &mut dyn FnMut(&mut Field)) {
    for node in nodes {
        match node {
            FormNode::Field(field) => visit(field),
            FormNode::Group { children, .. } => visit_fields_mut(children, visit),
        }
    }
}
