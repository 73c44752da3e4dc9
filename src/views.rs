//! HTML pages. Every interpolated value goes through [`escape`].

use std::fmt::Write;

use crate::{
    models::{AppointmentDetails, Doctor, User},
    service::session::Flash,
};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Navigation state for the page chrome.
pub struct Nav {
    pub user: bool,
    pub admin: bool,
}

pub fn layout(title: &str, flashes: &[Flash], nav: &Nav, body: &str) -> String {
    let mut links = String::from(r#"<a href="/">Home</a> <a href="/about">About</a>"#);
    if nav.user {
        links.push_str(r#" <a href="/dashboard">Dashboard</a> <a href="/book">Book</a>"#);
        links.push_str(r#" <a href="/my_appointments">My appointments</a>"#);
        links.push_str(r#" <a href="/logout">Logout</a>"#);
    } else {
        links.push_str(r#" <a href="/login">Login</a> <a href="/register">Register</a>"#);
    }
    if nav.admin {
        links.push_str(r#" <a href="/admin_dashboard">Admin</a>"#);
        links.push_str(r#" <a href="/admin_logout">Admin logout</a>"#);
    } else {
        links.push_str(r#" <a href="/admin_login">Admin</a>"#);
    }
    let mut messages = String::new();
    for flash in flashes {
        let _ = write!(
            messages,
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | Hospital Booking</title></head>
<body>
<nav>{links}</nav>
{messages}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn landing() -> String {
    r#"<p>Book and manage your hospital appointments online.</p>
<p><a href="/register">Create an account</a> or <a href="/login">log in</a> to get started.</p>"#
        .to_string()
}

pub fn about() -> String {
    r#"<p>Patients register, choose a doctor and request an appointment slot.
Hospital staff review every request and approve or decline it.</p>"#
        .to_string()
}

pub fn register() -> String {
    r#"<form method="post" action="/register">
<label>Full name <input name="fullname" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Contact <input name="contact" required></label>
<label>Address <input name="address" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<button type="submit">Register</button>
</form>"#
        .to_string()
}

pub fn login() -> String {
    r#"<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#
        .to_string()
}

pub fn admin_login() -> String {
    r#"<form method="post" action="/admin_login">
<label>Username <input name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#
        .to_string()
}

fn doctor_options(doctors: &[Doctor]) -> String {
    let mut options = String::new();
    for doctor in doctors {
        let _ = write!(
            options,
            r#"<option value="{}">{} ({}, {})</option>"#,
            doctor.id,
            escape(&doctor.name),
            escape(&doctor.specialization),
            escape(&doctor.schedule)
        );
    }
    options
}

fn doctor_table(doctors: &[Doctor], admin: bool) -> String {
    let mut rows = String::new();
    for doctor in doctors {
        let photo = match &doctor.photo {
            Some(path) => format!(r#"<img src="/static/{}" alt="" width="64">"#, escape(path)),
            None => String::new(),
        };
        let actions = if admin {
            format!(
                r#"<td><a href="/admin/doctor/{id}/edit">Edit</a>
<form method="post" action="/admin/doctor/{id}/delete">
<button type="submit">Delete</button></form></td>"#,
                id = doctor.id
            )
        } else {
            String::new()
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}</tr>",
            photo,
            escape(&doctor.name),
            escape(&doctor.specialization),
            escape(&doctor.schedule),
            escape(&doctor.status),
            actions
        );
    }
    format!(
        r#"<table class="doctors"><tr><th></th><th>Name</th><th>Specialization</th>
<th>Schedule</th><th>Status</th>{}</tr>{}</table>"#,
        if admin { "<th></th>" } else { "" },
        rows
    )
}

/// `actions` renders the last column for one row.
fn appointment_table(
    appointments: &[AppointmentDetails],
    actions: impl Fn(&AppointmentDetails) -> String,
) -> String {
    if appointments.is_empty() {
        return "<p>No appointments.</p>".to_string();
    }
    let mut rows = String::new();
    for appointment in appointments {
        let _ = write!(
            rows,
            r#"<tr><td><a href="/appointment/{id}">#{id}</a></td>
<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>
<td class="status-{status}">{status}</td><td>{}</td></tr>"#,
            escape(&appointment.name),
            escape(&appointment.doctor_name),
            escape(&appointment.date),
            escape(&appointment.time),
            escape(&appointment.reason),
            actions(appointment),
            id = appointment.id,
            status = appointment.status,
        );
    }
    format!(
        r#"<table class="appointments"><tr><th>ID</th><th>Patient</th><th>Doctor</th>
<th>Date</th><th>Time</th><th>Reason</th><th>Status</th><th></th></tr>{rows}</table>"#
    )
}

fn cancel_link(appointment: &AppointmentDetails) -> String {
    format!(r#"<a href="/cancel/{}">Cancel</a>"#, appointment.id)
}

pub fn dashboard(user: &User, upcoming: &[AppointmentDetails], doctors: &[Doctor]) -> String {
    format!(
        r#"<section class="profile"><p>Welcome, {}</p><p>{} | {} | {}</p></section>
<h2>Upcoming appointments</h2>
{}
<p><a href="/book">Book an appointment</a></p>
<h2>Our doctors</h2>
{}"#,
        escape(&user.fullname),
        escape(&user.email),
        escape(&user.contact),
        escape(&user.address),
        appointment_table(upcoming, cancel_link),
        doctor_table(doctors, false)
    )
}

pub fn book(user: &User, doctors: &[Doctor]) -> String {
    format!(
        r#"<p>Booking as {}</p>
<form method="post" action="/book">
<label>Doctor <select name="doctor_id" required>{}</select></label>
<label>Date <input type="date" name="date" required></label>
<label>Time <input type="time" name="time" required></label>
<label>Reason <textarea name="reason" required></textarea></label>
<button type="submit">Book</button>
</form>"#,
        escape(&user.fullname),
        doctor_options(doctors)
    )
}

pub fn my_appointments(appointments: &[AppointmentDetails]) -> String {
    appointment_table(appointments, cancel_link)
}

pub fn appointment_detail(appointment: &AppointmentDetails, admin: bool) -> String {
    let actions = if admin {
        format!(
            r#"<form method="post" action="/approve/{id}">
<button type="submit">Approve</button></form>
<form method="post" action="/decline/{id}"><button type="submit">Decline</button></form>"#,
            id = appointment.id
        )
    } else {
        cancel_link(appointment)
    };
    format!(
        r#"<dl>
<dt>Patient</dt><dd>{}</dd>
<dt>Doctor</dt><dd>{} ({})</dd>
<dt>Date</dt><dd>{}</dd>
<dt>Time</dt><dd>{}</dd>
<dt>Reason</dt><dd>{}</dd>
<dt>Status</dt><dd class="status-{status}">{status}</dd>
<dt>Requested</dt><dd>{}</dd>
</dl>
{}"#,
        escape(&appointment.name),
        escape(&appointment.doctor_name),
        escape(&appointment.doctor_specialization),
        escape(&appointment.date),
        escape(&appointment.time),
        escape(&appointment.reason),
        appointment.created_at.format("%Y-%m-%d %H:%M UTC"),
        actions,
        status = appointment.status,
    )
}

pub fn admin_dashboard(appointments: &[AppointmentDetails], doctors: &[Doctor]) -> String {
    let table = appointment_table(appointments, |appointment| {
        format!(
            r#"<form method="post" action="/approve/{id}">
<button type="submit">Approve</button></form>
<form method="post" action="/decline/{id}"><button type="submit">Decline</button></form>"#,
            id = appointment.id
        )
    });
    format!(
        r#"<h2>Appointments</h2>
{}
<h2>Doctors</h2>
<p><a href="/doctor_register">Register a doctor</a></p>
{}"#,
        table,
        doctor_table(doctors, true)
    )
}

pub fn doctor_register() -> String {
    r#"<form method="post" action="/doctor_register" enctype="multipart/form-data">
<label>Name <input name="name" required></label>
<label>Specialization <input name="specialization" required></label>
<label>Schedule <input name="schedule" required></label>
<label>Photo <input type="file" name="photo" accept=".png,.jpg,.jpeg,.gif"></label>
<button type="submit">Register doctor</button>
</form>"#
        .to_string()
}

pub fn doctor_edit(doctor: &Doctor) -> String {
    let photo = match &doctor.photo {
        Some(path) => format!(r#"<p><img src="/static/{}" alt="" width="128"></p>"#, escape(path)),
        None => String::new(),
    };
    format!(
        r#"{photo}
<form method="post" action="/admin/doctor/{id}/edit" enctype="multipart/form-data">
<label>Name <input name="name" value="{}" required></label>
<label>Specialization <input name="specialization" value="{}" required></label>
<label>Schedule <input name="schedule" value="{}" required></label>
<label>Status <input name="status" value="{}"></label>
<label>Photo <input type="file" name="photo" accept=".png,.jpg,.jpeg,.gif"></label>
<button type="submit">Save</button>
</form>"#,
        escape(&doctor.name),
        escape(&doctor.specialization),
        escape(&doctor.schedule),
        escape(&doctor.status),
        id = doctor.id,
    )
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        &[],
        &Nav { user: false, admin: false },
        r#"<p>The requested page does not exist.</p><p><a href="/">Back to home</a></p>"#,
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &[],
        &Nav { user: false, admin: false },
        &format!(r#"<p>{}</p><p><a href="/">Back to home</a></p>"#, escape(message)),
    )
}
