//! Exercises the short/long form boundary (255 vs. 256 byte payloads)
//! over a real handshaken channel, not just the codec unit in isolation.

use std::thread;

use zmtp::{Channel, Flags, Message};

#[test]
fn payloads_at_and_above_the_short_form_limit_round_trip() {
    let port = portpicker::pick_unused_port().expect("free port");
    let endpoint = format!("tcp://127.0.0.1:{port}");

    let server_endpoint = endpoint.clone();
    let server = thread::spawn(move || {
        let mut server = Channel::new();
        server.listen_endpoint(&server_endpoint).unwrap();
        for _ in 0..2 {
            let msg = server.recv().unwrap();
            server.send(&Message::from_owned(msg.flags(), msg.data().to_vec())).unwrap();
        }
    });

    thread::sleep(std::time::Duration::from_millis(50));

    let mut client = Channel::new();
    client.connect_endpoint(&endpoint).unwrap();

    for len in [255usize, 256] {
        let payload = vec![0xAB; len];
        client.send(&Message::from_borrowed(Flags::NONE, &payload)).unwrap();
        let reply = client.recv().unwrap();
        assert_eq!(reply.data(), payload.as_slice());
    }

    server.join().unwrap();
}
