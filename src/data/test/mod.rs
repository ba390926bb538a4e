mod clan;
mod faq;
mod modmail;
mod temp_voice;
mod ticket;
