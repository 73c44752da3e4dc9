use serde::Deserialize;

use crate::service::upload::PhotoUpload;

#[derive(Debug, Deserialize, Clone)]
pub struct RegisterForm {
    pub fullname: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
}

/// `doctor_id` stays text so a bogus value is reported like a missing doctor.
#[derive(Debug, Deserialize, Clone)]
pub struct BookForm {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// Doctor registration/edit form, assembled from a multipart body.
#[derive(Debug, Clone, Default)]
pub struct DoctorForm {
    pub name: String,
    pub specialization: String,
    pub schedule: String,
    pub status: Option<String>,
    pub photo: Option<PhotoUpload>,
}

impl DoctorForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "specialization" => self.specialization = value,
            "schedule" => self.schedule = value,
            "status" => self.status = Some(value),
            _ => {}
        }
    }

    pub fn has_required_fields(&self) -> bool {
        [&self.name, &self.specialization, &self.schedule]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}
